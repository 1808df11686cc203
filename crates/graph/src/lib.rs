//! # flowlang-graph
//!
//! Graph analysis and export for realized FlowLang diagrams.
//!
//! This crate loads the nodes and edges produced by
//! [`flowlang_parser::parse`] (or posted by the editor) into a petgraph
//! directed graph, enabling structural queries and standalone exports.
//!
//! ## Features
//!
//! - **Dangling Edge Detection**: Connections to undeclared names are kept aside and reported
//! - **Structure Queries**: Successors, predecessors, entry points and terminal nodes
//! - **Statistics**: Counts by kind, animated and labeled connections
//! - **Export**: Standalone SVG (matching the editor's export) and GraphML
//!
//! ## Example
//!
//! ```rust
//! use flowlang_graph::DiagramGraph;
//!
//! let source = r#"Diagram [title: "Approval"] {
//!   Submit [type: event, icon: flag, label: "Submitted"]
//!   Review [type: activity, icon: users, label: "Review"]
//!   Submit > Review
//!   Review > Archive
//! }"#;
//!
//! let diagram = flowlang_parser::parse(source).unwrap();
//! let graph = DiagramGraph::from_parsed(&diagram).unwrap();
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! assert_eq!(graph.dangling_edges().len(), 1);
//! assert_eq!(graph.successors("node-Submit-0"), vec!["node-Review-1"]);
//! ```

mod builder;
mod error;
mod queries;
pub mod render;

pub use builder::DiagramGraphBuilder;
pub use error::GraphError;
pub use queries::GraphStats;
pub use render::{render_graphml, render_svg};

use flowlang_parser::{Edge, Node, ParsedDiagram};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// A realized diagram as a directed graph.
///
/// Node weights are the editor nodes; edge weights are the editor edges.
/// Edges whose endpoints are not among the nodes cannot be placed in the
/// graph and are kept in declaration order as dangling edges.
#[derive(Debug)]
pub struct DiagramGraph {
    /// The underlying directed graph
    graph: DiGraph<Node, Edge>,

    /// Index of nodes by id
    index: HashMap<String, NodeIndex>,

    /// Edges with at least one unknown endpoint
    dangling: Vec<Edge>,
}

impl DiagramGraph {
    /// Build a graph from nodes and edges.
    pub fn build(nodes: &[Node], edges: &[Edge]) -> Result<Self, GraphError> {
        DiagramGraphBuilder::new().build(nodes, edges)
    }

    /// Build a graph from a parse result.
    pub fn from_parsed(diagram: &ParsedDiagram) -> Result<Self, GraphError> {
        Self::build(&diagram.nodes, &diagram.edges)
    }

    /// Get the underlying petgraph for advanced operations.
    pub fn inner(&self) -> &DiGraph<Node, Edge> {
        &self.graph
    }

    /// Look up a node by id.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).and_then(|idx| self.graph.node_weight(idx))
    }

    /// Graph index of the node with this id.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Edges whose endpoints both resolved, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_weights()
    }

    /// Edges with an unknown source or target.
    pub fn dangling_edges(&self) -> &[Edge] {
        &self.dangling
    }

    /// Get the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of placed edges in the graph (dangling edges excluded).
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let graph = DiagramGraph::build(&[], &[]).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.dangling_edges().is_empty());
    }

    #[test]
    fn test_from_parsed() {
        let source = r#"Diagram [title: "T"] {
  A [type: event]
  B [type: activity]
  A --> B : go
}"#;
        let diagram = flowlang_parser::parse(source).unwrap();
        let graph = DiagramGraph::from_parsed(&diagram).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.get_node("node-B-1").map(|n| n.kind()), Some("activity"));
        assert!(graph.get_node("B").is_none());
        assert_eq!(graph.edges().next().map(|e| e.label.as_str()), Some("go"));
    }
}
