//! Graph serializer - convert editor nodes and edges into FlowLang source.
//!
//! This is the graph → text half of the translation. A visual editor hands
//! over its current nodes and edges, and gets back FlowLang that the
//! [`crate::parser`] turns into an equivalent graph again.
//!
//! # Example
//!
//! ```rust
//! use flowlang_parser::model::{Edge, Node};
//! use flowlang_parser::palette::node_data;
//! use flowlang_parser::serialize;
//!
//! let nodes = vec![Node {
//!     id: "node-1".to_string(),
//!     render_type: "custom".to_string(),
//!     position: Default::default(),
//!     data: node_data("event", "Order Placed", "🚩"),
//! }];
//! let source = serialize(&nodes, &[], "Orders").unwrap();
//! assert!(source.contains(r#"orderPlaced [type: event, icon: flag, label: "Order Placed"]"#));
//! ```
//!
//! # Formatting
//!
//! - Nodes are grouped into one section per kind, in first-seen order
//! - Section titles are the capitalized kind plus a literal `s`
//! - 2-space indentation per nesting level
//! - Connections come last, one per line

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write;

use crate::error::Result;
use crate::model::{Edge, Node};
use crate::naming::{capitalize, flowlang_name};
use crate::parser::ConnectionStyle;

/// Title used by the editor when a sync request does not carry one.
pub const DEFAULT_TITLE: &str = "Diagram";

/// Serialize nodes and edges into FlowLang source.
///
/// Nodes with no label, icon or kind serialize with their id, `circle` and
/// `activity` respectively. Edges whose endpoints are not among `nodes`
/// still serialize, using the raw endpoint id as the name.
pub fn serialize(nodes: &[Node], edges: &[Edge], title: &str) -> Result<String> {
    let mut w = Writer::new();
    w.write_diagram(nodes, edges, title)?;
    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "serialized diagram to FlowLang"
    );
    Ok(w.finish())
}

/// Editor sync request: the current canvas state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncRequest {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default = "default_title")]
    pub diagram_title: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

/// FlowLang produced by a sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutput {
    pub flowlang_code: String,
}

/// Synchronize a canvas into FlowLang.
///
/// An empty canvas yields empty code so that the editor clears its code
/// pane; anything else goes through [`serialize`].
pub fn sync_diagram(request: &SyncRequest) -> Result<SyncOutput> {
    if request.nodes.is_empty() {
        return Ok(SyncOutput::default());
    }
    let flowlang_code = serialize(&request.nodes, &request.edges, &request.diagram_title)?;
    Ok(SyncOutput { flowlang_code })
}

/// Serialize a `{nodes, edges, diagram_title?}` JSON document.
///
/// Unlike [`sync_diagram_json`], an empty canvas still produces the
/// diagram header.
pub fn serialize_json(json: &str) -> Result<String> {
    let request: SyncRequest = serde_json::from_str(json)?;
    serialize(&request.nodes, &request.edges, &request.diagram_title)
}

/// Like [`sync_diagram`], starting from the JSON body the editor posts.
pub fn sync_diagram_json(json: &str) -> Result<SyncOutput> {
    let request: SyncRequest = serde_json::from_str(json)?;
    sync_diagram(&request)
}

/// Internal writer for building output.
struct Writer {
    output: String,
    indent: usize,
}

impl Writer {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Finished source; no newline after the closing brace.
    fn finish(mut self) -> String {
        if self.output.ends_with('\n') {
            self.output.pop();
        }
        self.output
    }

    /// Write indentation at current level (2 spaces per level).
    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
    }

    fn indent(&mut self) {
        self.indent += 1;
    }

    fn dedent(&mut self) {
        if self.indent > 0 {
            self.indent -= 1;
        }
    }

    /// Write a line with current indentation.
    fn writeln(&mut self, text: &str) -> Result<()> {
        self.write_indent();
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn newline(&mut self) {
        self.output.push('\n');
    }

    // ========================================================================
    // Diagram Block
    // ========================================================================

    fn write_diagram(&mut self, nodes: &[Node], edges: &[Edge], title: &str) -> Result<()> {
        writeln!(
            self.output,
            "Diagram [color: blue, layout: horizontal, title: \"{}\"] {{",
            title
        )?;
        self.newline();
        self.indent();

        let names = self.write_sections(nodes)?;
        if !edges.is_empty() {
            self.write_connections(edges, &names)?;
        }

        self.dedent();
        self.writeln("}")
    }

    // ========================================================================
    // Node Sections
    // ========================================================================

    /// Write one section per node kind; returns the id → name table.
    fn write_sections<'a>(&mut self, nodes: &'a [Node]) -> Result<HashMap<&'a str, String>> {
        let mut by_kind: IndexMap<&str, Vec<&Node>> = IndexMap::new();
        for node in nodes {
            by_kind.entry(node.kind()).or_default().push(node);
        }

        let mut names = HashMap::with_capacity(nodes.len());
        for (kind, members) in by_kind {
            let section = format!("{}s", capitalize(kind));
            self.writeln(&format!("// {} Section", section))?;
            self.writeln(&format!("{} {{", section))?;
            self.indent();

            for node in members {
                let name = flowlang_name(&node.id, node.label());
                self.write_indent();
                writeln!(
                    self.output,
                    "{} [type: {}, icon: {}, label: \"{}\"]",
                    name,
                    node.kind(),
                    node.icon_name(),
                    node.label()
                )?;
                names.insert(node.id.as_str(), name);
            }

            self.dedent();
            self.writeln("}")?;
            self.newline();
        }
        Ok(names)
    }

    // ========================================================================
    // Connections
    // ========================================================================

    fn write_connections(&mut self, edges: &[Edge], names: &HashMap<&str, String>) -> Result<()> {
        self.writeln("// Connections")?;
        for edge in edges {
            let source = resolve_name(names, &edge.source);
            let target = resolve_name(names, &edge.target);

            let style = ConnectionStyle::for_edge(edge);
            let line = match style {
                ConnectionStyle::Labeled => {
                    format!("{} {} {} : {}", source, style.arrow(), target, edge.label)
                }
                _ => format!("{} {} {}", source, style.arrow(), target),
            };
            self.writeln(&line)?;
        }
        Ok(())
    }
}

fn resolve_name<'a>(names: &'a HashMap<&str, String>, id: &'a str) -> &'a str {
    match names.get(id) {
        Some(name) => name.as_str(),
        None => {
            tracing::trace!(id, "edge endpoint outside node list, using raw id");
            id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowLangError;
    use crate::model::Position;
    use crate::palette::node_data;
    use pretty_assertions::assert_eq;

    fn node(id: &str, kind: &str, label: &str, glyph: &str) -> Node {
        Node {
            id: id.to_string(),
            render_type: "custom".to_string(),
            position: Position::default(),
            data: node_data(kind, label, glyph),
        }
    }

    #[test]
    fn test_serialize_groups_by_kind() {
        let nodes = vec![
            node("node-1", "event", "Start", "🚩"),
            node("node-2", "activity", "Review Document", "📄"),
            node("node-3", "event", "End", "✅"),
        ];
        let edges = vec![
            Edge::styled("node-1", "node-2"),
            Edge::styled("node-2", "node-3").with_label("approved"),
        ];

        let source = serialize(&nodes, &edges, "Review").unwrap();
        let expected = r#"Diagram [color: blue, layout: horizontal, title: "Review"] {

  // Events Section
  Events {
    start [type: event, icon: flag, label: "Start"]
    end [type: event, icon: check, label: "End"]
  }

  // Activitys Section
  Activitys {
    reviewDocument [type: activity, icon: file-text, label: "Review Document"]
  }

  // Connections
  start > reviewDocument
  reviewDocument --> end : approved
}"#;
        assert_eq!(source, expected);
    }

    #[test]
    fn test_empty_graph_is_well_formed() {
        let source = serialize(&[], &[], "Empty").unwrap();
        assert_eq!(
            source,
            "Diagram [color: blue, layout: horizontal, title: \"Empty\"] {\n\n}"
        );
    }

    #[test]
    fn test_animation_beats_label() {
        let nodes = vec![node("a", "event", "A", "🚩"), node("b", "event", "B", "🚩")];
        let edges = vec![Edge::styled("a", "b").with_label("x").animated(true)];
        let source = serialize(&nodes, &edges, "T").unwrap();
        assert!(source.contains("  a **>** b\n"), "got:\n{source}");
        assert!(!source.contains("-->"));
    }

    #[test]
    fn test_sparse_node_defaults() {
        let sparse: Node = serde_json::from_str(r#"{"id": "Loose End"}"#).unwrap();
        let source = serialize(&[sparse], &[], "T").unwrap();
        assert!(source.contains("  Activitys {\n"));
        assert!(source.contains(r#"looseEnd [type: activity, icon: circle, label: "Loose End"]"#));
    }

    #[test]
    fn test_unknown_glyph_serializes_as_circle() {
        let nodes = vec![node("n", "note", "Remember", "🦀")];
        let source = serialize(&nodes, &[], "T").unwrap();
        assert!(source.contains("icon: circle"));
        assert!(source.contains("Notes {"));
    }

    #[test]
    fn test_dangling_endpoint_uses_raw_id() {
        let nodes = vec![node("node-1", "event", "Start", "🚩")];
        let edges = vec![Edge::styled("node-1", "node-99")];
        let source = serialize(&nodes, &edges, "T").unwrap();
        assert!(source.contains("  start > node-99\n"));
    }

    #[test]
    fn test_sync_empty_canvas_clears_code() {
        let output = sync_diagram(&SyncRequest::default()).unwrap();
        assert_eq!(output.flowlang_code, "");
    }

    #[test]
    fn test_sync_json_defaults_title() {
        let json = r#"{"nodes": [{"id": "node-1", "data": {"label": "Go", "type": "event"}}]}"#;
        let output = sync_diagram_json(json).unwrap();
        assert!(output.flowlang_code.contains(r#"title: "Diagram""#));
        assert!(output.flowlang_code.contains("go [type: event"));
    }

    #[test]
    fn test_sync_json_rejects_malformed_body() {
        assert!(sync_diagram_json(r#"{"nodes": 3}"#).is_err());
    }

    #[test]
    fn test_serialize_json_keeps_header_for_empty_canvas() {
        let json = r#"{"nodes": [], "edges": [], "diagram_title": "Blank"}"#;
        assert_eq!(
            serialize_json(json).unwrap(),
            "Diagram [color: blue, layout: horizontal, title: \"Blank\"] {\n\n}"
        );
        // The editor sync path clears the code pane instead.
        assert_eq!(sync_diagram_json(json).unwrap().flowlang_code, "");
    }

    #[test]
    fn test_serialize_json_nodes_and_errors() {
        let json = r#"{"nodes": [{"id": "node-1", "data": {"label": "Go", "type": "event"}}]}"#;
        let source = serialize_json(json).unwrap();
        assert!(source.starts_with(r#"Diagram [color: blue, layout: horizontal, title: "Diagram"] {"#));
        assert!(source.contains("go [type: event"));

        assert!(matches!(serialize_json("{not json"), Err(FlowLangError::Malformed(_))));
    }
}
