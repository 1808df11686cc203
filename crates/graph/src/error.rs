//! Error types for graph construction and rendering.

use thiserror::Error;

/// Errors that can occur while building a [`crate::DiagramGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Two nodes share an id; edges could not be attached unambiguously.
    #[error("duplicate node id '{id}'")]
    DuplicateNode { id: String },

    /// Writing an export failed.
    #[error("failed to render graph: {0}")]
    Render(#[from] std::fmt::Error),
}
