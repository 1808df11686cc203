//! Error types for FlowLang translation.
//!
//! Malformed-but-tolerable input (missing attributes, unknown icons, dangling
//! connection endpoints) never produces an error; it is resolved through the
//! documented defaults. What remains here are the unexpected failures that a
//! public operation catches and reports through [`crate::response::Response`].
//!
//! Failures of the external completion service are a separate category and
//! live in [`crate::completion::CompletionError`].

use thiserror::Error;

/// The main error type for FlowLang parse and serialize operations.
#[derive(Debug, Error)]
pub enum FlowLangError {
    /// A built-in scanning pattern failed to compile.
    #[error("invalid scanning pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Diagram data handed in as JSON did not have the expected shape.
    #[error("malformed diagram data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A translation step failed while writing output.
    #[error("failed to write FlowLang output: {0}")]
    Write(#[from] std::fmt::Error),

    /// The operation panicked; the payload message is preserved.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for FlowLang operations.
pub type Result<T> = std::result::Result<T, FlowLangError>;
