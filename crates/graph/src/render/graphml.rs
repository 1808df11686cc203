//! GraphML export for graph visualization.
//!
//! GraphML is an XML-based format for graph exchange that is widely supported
//! by graph visualization tools like yEd, Gephi, Cytoscape, etc.

use crate::error::GraphError;
use crate::DiagramGraph;
use petgraph::visit::EdgeRef;
use std::fmt::Write;

use super::escape_xml;

/// `(id, for, attr.type)` of every GraphML key, in declaration order.
const KEYS: [(&str, &str, &str); 7] = [
    ("kind", "node", "string"),
    ("label", "node", "string"),
    ("icon", "node", "string"),
    ("x", "node", "double"),
    ("y", "node", "double"),
    ("edge_label", "edge", "string"),
    ("animated", "edge", "boolean"),
];

/// Render a DiagramGraph as GraphML XML.
///
/// The output includes:
/// - Node attributes: kind, label, icon (symbolic name), x, y
/// - Edge attributes: edge_label, animated
///
/// Node ids are the diagram's node ids. Dangling edges are omitted.
pub fn render_graphml(graph: &DiagramGraph) -> Result<String, GraphError> {
    let inner = graph.inner();
    let mut output = String::new();

    // XML header and GraphML schema
    writeln!(output, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(output, r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns""#)?;
    writeln!(output, r#"         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#)?;
    writeln!(output, r#"         xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns"#)?;
    writeln!(output, r#"         http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">"#)?;

    for (id, target, attr_type) in KEYS {
        let name = if id == "edge_label" { "label" } else { id };
        writeln!(
            output,
            r#"  <key id="{id}" for="{target}" attr.name="{name}" attr.type="{attr_type}"/>"#
        )?;
    }

    writeln!(output, r#"  <graph id="G" edgedefault="directed">"#)?;

    for node in graph.nodes() {
        writeln!(output, r#"    <node id="{}">"#, escape_xml(&node.id))?;
        writeln!(output, r#"      <data key="kind">{}</data>"#, escape_xml(node.kind()))?;
        writeln!(output, r#"      <data key="label">{}</data>"#, escape_xml(node.label()))?;
        writeln!(output, r#"      <data key="icon">{}</data>"#, node.icon_name())?;
        writeln!(output, r#"      <data key="x">{}</data>"#, node.position.x)?;
        writeln!(output, r#"      <data key="y">{}</data>"#, node.position.y)?;
        writeln!(output, r#"    </node>"#)?;
    }

    for (edge_id, edge) in inner.edge_references().enumerate() {
        let (Some(source), Some(target)) =
            (inner.node_weight(edge.source()), inner.node_weight(edge.target()))
        else {
            continue;
        };
        let weight = edge.weight();

        writeln!(
            output,
            r#"    <edge id="e{}" source="{}" target="{}">"#,
            edge_id,
            escape_xml(&source.id),
            escape_xml(&target.id)
        )?;
        if weight.has_label() {
            writeln!(
                output,
                r#"      <data key="edge_label">{}</data>"#,
                escape_xml(&weight.label)
            )?;
        }
        writeln!(output, r#"      <data key="animated">{}</data>"#, weight.animated)?;
        writeln!(output, r#"    </edge>"#)?;
    }

    // Close graph and graphml
    writeln!(output, r#"  </graph>"#)?;
    writeln!(output, r#"</graphml>"#)?;

    Ok(output)
}
