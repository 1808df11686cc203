//! Builder for constructing a DiagramGraph from nodes and edges.

use crate::error::GraphError;
use crate::DiagramGraph;
use flowlang_parser::{Edge, Node};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Builder for constructing a diagram graph.
pub struct DiagramGraphBuilder {
    graph: DiGraph<Node, Edge>,
    index: HashMap<String, NodeIndex>,
    dangling: Vec<Edge>,
}

impl DiagramGraphBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            dangling: Vec::new(),
        }
    }

    /// Build a DiagramGraph.
    pub fn build(mut self, nodes: &[Node], edges: &[Edge]) -> Result<DiagramGraph, GraphError> {
        // Phase 1: nodes
        self.add_nodes(nodes)?;

        // Phase 2: edges between known nodes
        self.add_edges(edges);

        tracing::debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            dangling = self.dangling.len(),
            "built diagram graph"
        );

        Ok(DiagramGraph {
            graph: self.graph,
            index: self.index,
            dangling: self.dangling,
        })
    }

    fn add_nodes(&mut self, nodes: &[Node]) -> Result<(), GraphError> {
        for node in nodes {
            if self.index.contains_key(&node.id) {
                return Err(GraphError::DuplicateNode {
                    id: node.id.clone(),
                });
            }
            let idx = self.graph.add_node(node.clone());
            self.index.insert(node.id.clone(), idx);
        }
        Ok(())
    }

    fn add_edges(&mut self, edges: &[Edge]) {
        for edge in edges {
            let source = self.index.get(&edge.source).copied();
            let target = self.index.get(&edge.target).copied();
            match (source, target) {
                (Some(source), Some(target)) => {
                    self.graph.add_edge(source, target, edge.clone());
                }
                _ => {
                    tracing::trace!(
                        source = %edge.source,
                        target = %edge.target,
                        "edge endpoint not among nodes, keeping as dangling"
                    );
                    self.dangling.push(edge.clone());
                }
            }
        }
    }
}

impl Default for DiagramGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowlang_parser::model::Position;
    use flowlang_parser::palette::new_node;

    #[test]
    fn test_duplicate_node_id_is_rejected() {
        let node = new_node("event", 1, Position::default());
        let err = DiagramGraph::build(&[node.clone(), node], &[]).unwrap_err();
        assert_eq!(
            err,
            GraphError::DuplicateNode {
                id: "node-1".to_string()
            }
        );
    }

    #[test]
    fn test_dangling_edges_keep_order() {
        let nodes = vec![new_node("event", 1, Position::default())];
        let edges = vec![
            Edge::styled("node-1", "ghost"),
            Edge::styled("phantom", "node-1"),
        ];
        let graph = DiagramGraph::build(&nodes, &edges).unwrap();

        assert_eq!(graph.edge_count(), 0);
        let ids: Vec<&str> = graph.dangling_edges().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["node-1-ghost", "phantom-node-1"]);
    }

    #[test]
    fn test_self_loop_is_placed() {
        let nodes = vec![new_node("activity", 4, Position::default())];
        let graph = DiagramGraph::build(&nodes, &[Edge::styled("node-4", "node-4")]).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }
}
