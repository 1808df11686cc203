//! # flowlang
//!
//! FlowLang diagram language: text/graph translation, graph analysis and export.
//!
//! ## Features
//!
//! | Feature | Crate | Description |
//! |---------|-------|-------------|
//! | (always) | [`flowlang-parser`] | Parser, serializer, icon and palette tables, envelopes |
//! | `graph`  | [`flowlang-graph`]  | petgraph view, queries, SVG and GraphML export |
//! | `wasm`   | [`flowlang-parser`] | Browser bindings for visual editors |
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! flowlang = { version = "0.1", features = ["graph"] }
//! ```
//!
//! ```rust
//! let diagram = flowlang::parse("Start [type: event]\nEnd [type: event]\nStart > End").unwrap();
//! let text = flowlang::serialize(&diagram.nodes, &diagram.edges, "Flow").unwrap();
//! assert!(text.contains("start > end"));
//! ```

pub use flowlang_parser::*;

#[cfg(feature = "graph")]
pub use flowlang_graph as graph;
