//! Query operations on the diagram graph.

use crate::DiagramGraph;
use indexmap::IndexMap;
use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

impl DiagramGraph {
    /// Ids of the nodes `id` connects to, in edge declaration order.
    ///
    /// Unknown ids have no successors.
    pub fn successors(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Ids of the nodes connecting to `id`, in edge declaration order.
    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Vec<&str> {
        let Some(idx) = self.index_of(id) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, direction)
            .map(|e| {
                let other = match direction {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (e.id().index(), other)
            })
            .collect();
        edges.sort_by_key(|(edge, _)| *edge);
        edges.into_iter().map(|(_, other)| self.id_at(other)).collect()
    }

    /// Entry points: nodes without incoming edges, in node order.
    pub fn roots(&self) -> Vec<&str> {
        self.without_edges(Direction::Incoming)
    }

    /// Terminal nodes: nodes without outgoing edges, in node order.
    pub fn leaves(&self) -> Vec<&str> {
        self.without_edges(Direction::Outgoing)
    }

    fn without_edges(&self, direction: Direction) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.edges_directed(idx, direction).next().is_none())
            .map(|idx| self.id_at(idx))
            .collect()
    }

    /// Whether any sequence of connections returns to its start.
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// A topological ordering of node ids.
    ///
    /// Returns None if there are cycles.
    pub fn topological_order(&self) -> Option<Vec<&str>> {
        toposort(&self.graph, None)
            .ok()
            .map(|sorted| sorted.into_iter().map(|idx| self.id_at(idx)).collect())
    }

    /// Get summary statistics about the graph.
    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            nodes: self.node_count(),
            edges: self.edge_count(),
            dangling_edges: self.dangling.len(),
            roots: self.roots().len(),
            leaves: self.leaves().len(),
            has_cycles: self.has_cycles(),
            ..GraphStats::default()
        };

        for node in self.nodes() {
            *stats.kinds.entry(node.kind().to_string()).or_default() += 1;
        }

        for edge in self.edges() {
            if edge.animated {
                stats.animated_edges += 1;
            }
            if edge.has_label() {
                stats.labeled_edges += 1;
            }
        }

        stats
    }

    fn id_at(&self, idx: NodeIndex) -> &str {
        self.graph
            .node_weight(idx)
            .map(|node| node.id.as_str())
            .unwrap_or_default()
    }
}

/// Summary statistics about the graph.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub dangling_edges: usize,
    pub animated_edges: usize,
    pub labeled_edges: usize,
    pub roots: usize,
    pub leaves: usize,
    pub has_cycles: bool,
    /// Node count per kind, in first-seen order.
    pub kinds: IndexMap<String, usize>,
}

impl GraphStats {
    /// Total number of connections, placed or not.
    pub fn total_edges(&self) -> usize {
        self.edges + self.dangling_edges
    }
}

#[cfg(test)]
mod tests {
    use crate::DiagramGraph;
    use pretty_assertions::assert_eq;

    fn graph(source: &str) -> DiagramGraph {
        let diagram = flowlang_parser::parse(source).unwrap();
        DiagramGraph::from_parsed(&diagram).unwrap()
    }

    const REVIEW: &str = r#"Diagram [title: "Review"] {
  Submit [type: event]
  Check [type: activity]
  Fix [type: activity]
  Done [type: event]
  Memo [type: note]
  Submit > Check
  Check --> Fix : rejected
  Check --> Done : approved
  Fix **>** Check
  Done > Outbox
}"#;

    #[test]
    fn test_successors_follow_declaration_order() {
        let g = graph(REVIEW);
        assert_eq!(g.successors("node-Check-1"), vec!["node-Fix-2", "node-Done-3"]);
        assert_eq!(g.successors("missing"), Vec::<&str>::new());
    }

    #[test]
    fn test_predecessors() {
        let g = graph(REVIEW);
        // The emphasized edge is scanned before the plain one.
        assert_eq!(g.predecessors("node-Check-1"), vec!["node-Fix-2", "node-Submit-0"]);
    }

    #[test]
    fn test_roots_and_leaves() {
        let g = graph(REVIEW);
        assert_eq!(g.roots(), vec!["node-Submit-0", "node-Memo-4"]);
        // The dangling `Done > Outbox` does not count as an outgoing edge.
        assert_eq!(g.leaves(), vec!["node-Done-3", "node-Memo-4"]);
    }

    #[test]
    fn test_cycles() {
        let g = graph(REVIEW);
        assert!(g.has_cycles());
        assert!(g.topological_order().is_none());

        let g = graph("A [type: event]\nB [type: event]\nA > B\n");
        assert!(!g.has_cycles());
        assert_eq!(g.topological_order(), Some(vec!["node-A-0", "node-B-1"]));
    }

    #[test]
    fn test_stats() {
        let stats = graph(REVIEW).stats();
        assert_eq!(stats.nodes, 5);
        assert_eq!(stats.edges, 4);
        assert_eq!(stats.dangling_edges, 1);
        assert_eq!(stats.total_edges(), 5);
        // `Fix **>** Check` parses as an ordinary edge.
        assert_eq!(stats.animated_edges, 0);
        assert_eq!(stats.labeled_edges, 2);
        assert_eq!(stats.roots, 2);
        assert!(stats.has_cycles);

        let kinds: Vec<(&str, usize)> = stats.kinds.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(kinds, vec![("event", 2), ("activity", 2), ("note", 1)]);
    }

    #[test]
    fn test_stats_count_editor_animated_edges() {
        let mut diagram = flowlang_parser::parse(REVIEW).unwrap();
        for edge in &mut diagram.edges {
            edge.animated = edge.label.is_empty();
        }
        let stats = DiagramGraph::from_parsed(&diagram).unwrap().stats();
        // The dangling `Done > Outbox` is not counted.
        assert_eq!(stats.animated_edges, 2);
        assert_eq!(stats.labeled_edges, 2);
    }

    #[test]
    fn test_stats_json_shape() {
        let stats = graph("A [type: event]\nB [type: note]\nA > B\n").stats();
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["kinds"], serde_json::json!({"event": 1, "note": 1}));
        assert_eq!(value["has_cycles"], false);
    }
}
