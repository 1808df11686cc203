//! Standalone SVG export.
//!
//! Draws every node as a fixed-size box at its canvas position and every
//! placed edge as a straight arrow from the bottom centre of its source to
//! the top centre of its target. Edges are drawn first so nodes cover them.

use crate::error::GraphError;
use crate::DiagramGraph;
use flowlang_parser::model::{Node, EDGE_STROKE};
use flowlang_parser::Edge;
use std::fmt::Write;

use super::escape_xml;

pub const NODE_WIDTH: f64 = 200.0;
pub const NODE_HEIGHT: f64 = 80.0;
/// Margin around the bounding box of all nodes.
pub const PADDING: f64 = 50.0;

const DEFAULT_BACKGROUND: &str = "#F3F4F6";
const DEFAULT_BORDER: &str = "#D1D5DB";
const DEFAULT_TEXT: &str = "#374151";
const DEFAULT_ICON: &str = "#6B7280";
const DEFAULT_FONT_SIZE: f64 = 14.0;
const DEFAULT_FONT_FAMILY: &str = "Arial";
const EDGE_LABEL_FONT_SIZE: f64 = 12.0;

/// The drawing area: bounding box of all nodes plus padding.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ViewBox {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl ViewBox {
    fn around<'a>(nodes: impl Iterator<Item = &'a Node>) -> Option<Self> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for node in nodes {
            let (x, y) = (node.position.x, node.position.y);
            let (right, bottom) = (x + NODE_WIDTH, y + NODE_HEIGHT);
            bounds = Some(match bounds {
                None => (x, y, right, bottom),
                Some((min_x, min_y, max_x, max_y)) => {
                    (min_x.min(x), min_y.min(y), max_x.max(right), max_y.max(bottom))
                }
            });
        }
        bounds.map(|(min_x, min_y, max_x, max_y)| Self {
            x: min_x - PADDING,
            y: min_y - PADDING,
            width: max_x - min_x + 2.0 * PADDING,
            height: max_y - min_y + 2.0 * PADDING,
        })
    }
}

/// Render a DiagramGraph as a standalone SVG document.
///
/// An empty diagram renders as `<svg></svg>`. Dangling edges are not drawn.
pub fn render_svg(graph: &DiagramGraph) -> Result<String, GraphError> {
    let Some(view) = ViewBox::around(graph.nodes()) else {
        return Ok("<svg></svg>".to_string());
    };

    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
        view.x, view.y, view.width, view.height, view.width, view.height
    )?;
    writeln!(
        out,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="white"/>"#,
        view.x, view.y, view.width, view.height
    )?;
    write_defs(&mut out)?;

    for edge in graph.edges() {
        let (Some(source), Some(target)) = (graph.get_node(&edge.source), graph.get_node(&edge.target))
        else {
            continue;
        };
        write_edge(&mut out, edge, source, target)?;
    }

    for node in graph.nodes() {
        write_node(&mut out, node)?;
    }

    out.push_str("</svg>");
    Ok(out)
}

fn write_defs(out: &mut String) -> Result<(), GraphError> {
    writeln!(out, "  <defs>")?;
    writeln!(
        out,
        r#"    <marker id="arrowhead" markerWidth="10" markerHeight="7" refX="9" refY="3.5" orient="auto" markerUnits="strokeWidth">"#
    )?;
    writeln!(out, r#"      <polygon points="0 0, 10 3.5, 0 7" fill="{}"/>"#, EDGE_STROKE)?;
    writeln!(out, "    </marker>")?;
    writeln!(out, "  </defs>")?;
    Ok(())
}

fn write_edge(out: &mut String, edge: &Edge, source: &Node, target: &Node) -> Result<(), GraphError> {
    let x1 = source.position.x + NODE_WIDTH / 2.0;
    let y1 = source.position.y + NODE_HEIGHT;
    let x2 = target.position.x + NODE_WIDTH / 2.0;
    let y2 = target.position.y;

    let stroke = edge
        .style
        .as_ref()
        .map(|s| s.stroke.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(EDGE_STROKE);
    let stroke_width = edge
        .style
        .as_ref()
        .map(|s| s.stroke_width)
        .filter(|w| *w != 0.0)
        .unwrap_or(2.0);

    writeln!(
        out,
        r#"  <line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}" marker-end="url(#arrowhead)"/>"#,
        escape_xml(stroke)
    )?;

    if edge.has_label() {
        writeln!(
            out,
            r#"  <text x="{}" y="{}" text-anchor="middle" font-family="Arial" font-size="{EDGE_LABEL_FONT_SIZE}" fill="{DEFAULT_TEXT}" dominant-baseline="middle">{}</text>"#,
            (x1 + x2) / 2.0,
            (y1 + y2) / 2.0,
            escape_xml(&edge.label)
        )?;
    }
    Ok(())
}

fn write_node(out: &mut String, node: &Node) -> Result<(), GraphError> {
    let data = &node.data;
    let (x, y) = (node.position.x, node.position.y);
    let (cx, cy) = (x + NODE_WIDTH / 2.0, y + NODE_HEIGHT / 2.0);

    let background = escape_xml(data.background_color.as_deref().unwrap_or(DEFAULT_BACKGROUND));
    let border = escape_xml(
        data.border_color
            .as_deref()
            .or(data.icon_color.as_deref())
            .unwrap_or(DEFAULT_BORDER),
    );
    let text_color = escape_xml(data.text_color.as_deref().unwrap_or(DEFAULT_TEXT));
    let icon_color = escape_xml(data.icon_color.as_deref().unwrap_or(DEFAULT_ICON));
    let font_size = data.font_size.unwrap_or(DEFAULT_FONT_SIZE);
    let font_family = escape_xml(data.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY));

    match data.shape.as_deref().unwrap_or("rectangle") {
        "circle" => writeln!(
            out,
            r#"  <circle cx="{cx}" cy="{cy}" r="{}" fill="{background}" stroke="{border}" stroke-width="2"/>"#,
            NODE_WIDTH.min(NODE_HEIGHT) / 2.0
        )?,
        "diamond" => writeln!(
            out,
            r#"  <polygon points="{cx},{y} {},{cy} {cx},{} {x},{cy}" fill="{background}" stroke="{border}" stroke-width="2"/>"#,
            x + NODE_WIDTH,
            y + NODE_HEIGHT
        )?,
        shape => {
            let rx = match shape {
                "rounded" => 12,
                "rectangle" => 6,
                _ => 0,
            };
            writeln!(
                out,
                r#"  <rect x="{x}" y="{y}" width="{NODE_WIDTH}" height="{NODE_HEIGHT}" fill="{background}" stroke="{border}" stroke-width="2" rx="{rx}"/>"#
            )?;
        }
    }

    let icon = data.icon.as_deref().filter(|i| !i.is_empty());
    if let Some(icon) = icon {
        writeln!(
            out,
            r#"  <text x="{cx}" y="{}" text-anchor="middle" font-family="Arial" font-size="{}" fill="{icon_color}" dominant-baseline="middle">{}</text>"#,
            cy - 8.0,
            (font_size * 1.2).max(16.0),
            escape_xml(icon)
        )?;
    }

    let label_y = if icon.is_some() { cy + 12.0 } else { cy };
    let label = data
        .label
        .as_deref()
        .filter(|l| !l.is_empty())
        .unwrap_or(&node.id);
    writeln!(
        out,
        r#"  <text x="{cx}" y="{label_y}" text-anchor="middle" font-family="{font_family}" font-size="{font_size}" fill="{text_color}" dominant-baseline="middle">{}</text>"#,
        escape_xml(label)
    )?;
    Ok(())
}
