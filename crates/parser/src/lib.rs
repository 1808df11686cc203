//! # flowlang-parser
//!
//! Bidirectional translation between FlowLang, a small textual diagram
//! language, and the node/edge graph consumed by visual flow editors.
//!
//! This crate provides:
//!
//! - **Parsing** of FlowLang source into positioned, styled nodes and edges
//! - **Serialization** of an editor graph back into canonical FlowLang
//! - **Icon and palette tables** shared by both directions
//! - **Response envelopes** (`{"success": ...}`) for JSON boundaries
//! - **WASM bindings** for browser-based editors
//!
//! ## Quick Start
//!
//! ```rust
//! use flowlang_parser::{parse, serialize};
//!
//! let source = r#"Diagram [color: blue, layout: horizontal, title: "Orders"] {
//!   Events {
//!     Placed [type: event, icon: flag, label: "Order Placed"]
//!   }
//!   Activitys {
//!     Ship [type: activity, icon: truck, label: "Ship Order"]
//!   }
//!   Placed > Ship
//! }"#;
//!
//! let diagram = parse(source).unwrap();
//! assert_eq!(diagram.nodes.len(), 2);
//! assert_eq!(diagram.edges[0].source, "node-Placed-0");
//!
//! let text = serialize(&diagram.nodes, &diagram.edges, "Orders").unwrap();
//! assert!(text.contains("orderPlaced > shipOrder"));
//! ```
//!
//! ## FlowLang Overview
//!
//! ```text
//! Diagram [color: blue, layout: horizontal, title: "Checkout"] {
//!   // Events Section
//!   Events {
//!     Start [type: event, icon: flag, label: "Cart Ready"]
//!   }
//!
//!   Start > Pay                  // plain
//!   Pay --> Ship : if approved   // labeled
//!   Ship **>** Done              // emphasized (priority scan)
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`model`] - Editor graph types (nodes, edges, diagram metadata)
//! - [`parser`] - FlowLang text to graph
//! - [`serializer`] - Graph to FlowLang text
//! - [`icons`] - Icon name and glyph tables
//! - [`palette`] - Per-kind colours and node construction
//! - [`naming`] - FlowLang identifier derivation
//! - [`response`] - `{success, ...}` envelopes
//! - [`completion`] - Contract with the external text-completion service
//! - [`error`] - Error types
//!
//! ## Feature Flags
//!
//! - `wasm` - Enable WebAssembly bindings for browser use

pub mod completion;
pub mod error;
pub mod icons;
pub mod model;
pub mod naming;
pub mod palette;
pub mod parser;
pub mod response;
pub mod serializer;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use error::{FlowLangError, Result};
pub use model::{DiagramInfo, Edge, Node, NodeData, ParsedDiagram, Position};
pub use parser::parse;
pub use response::{respond, Response};
pub use serializer::{serialize, serialize_json, sync_diagram, SyncOutput, SyncRequest};

/// Parse FlowLang source into a response envelope.
///
/// # Example
///
/// ```rust
/// let response = flowlang_parser::parse_flowlang("A [type: event]");
/// assert!(response.is_success());
/// ```
pub fn parse_flowlang(source: &str) -> Response<ParsedDiagram> {
    respond(|| parse(source))
}

/// Parse FlowLang source and return the envelope as a JSON string.
pub fn parse_flowlang_json(source: &str) -> String {
    response::to_json(&parse_flowlang(source))
}

/// Serialize an editor graph, given as a JSON sync request, into a JSON
/// envelope carrying `flowlang_code`.
///
/// Malformed input yields a failure envelope rather than an error.
pub fn sync_diagram_json(request: &str) -> String {
    response::to_json(&respond(|| serializer::sync_diagram_json(request)))
}
