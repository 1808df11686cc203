//! FlowLang parser - convert FlowLang source into editor nodes and edges.
//!
//! The parser runs three independent scans over the source:
//!
//! 1. **Header** - the first `Name [attrs] {` declaration provides the
//!    diagram `color` and `title`. Missing attributes stay absent.
//! 2. **Nodes** - every `Name [attrs]` whose attributes contain `type:`
//!    becomes a node. Sections are transparent: nodes are placed on a
//!    3-column grid purely in discovery order.
//! 3. **Connections** - the emphasized, labeled and plain arrow patterns are
//!    scanned in that order. Endpoints resolve through the names declared in
//!    step 2; an unknown name is kept verbatim as the endpoint id.
//!
//! Only the first connection between a given pair of ids survives.
//! Parsed edges are never animated: `**>**` only raises scan priority.
//! Animation is set in the editor and written back as `**>**`.
//!
//! # Example
//!
//! ```rust
//! let source = r#"Diagram [color: blue, title: "Checkout"] {
//!   Events {
//!     Start [type: event, icon: flag, label: "Cart Ready"]
//!     Paid [type: event, icon: check, label: "Paid"]
//!   }
//!   Start **>** Paid
//! }"#;
//!
//! let diagram = flowlang_parser::parse(source).unwrap();
//! assert_eq!(diagram.nodes.len(), 2);
//! assert_eq!(diagram.edges[0].id, "node-Start-0-node-Paid-1");
//! assert!(!diagram.edges[0].animated);
//! assert_eq!(diagram.diagram_info.title.as_deref(), Some("Checkout"));
//! ```

mod patterns;


pub use patterns::ConnectionStyle;

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::icons;
use crate::model::{edge_key, DiagramInfo, Edge, Node, ParsedDiagram, Position, DEFAULT_KIND};
use crate::palette::node_data;
use patterns::Patterns;

/// Nodes per grid row.
pub const GRID_COLUMNS: usize = 3;
/// Coordinate of the first grid cell on both axes.
pub const GRID_ORIGIN: f64 = 100.0;
/// Horizontal distance between grid columns.
pub const COLUMN_SPACING: f64 = 300.0;
/// Vertical distance between grid rows.
pub const ROW_SPACING: f64 = 200.0;

/// Marker that distinguishes node declarations from other bracketed ones.
const NODE_MARKER: &str = "type:";

/// Parse FlowLang source into nodes, edges and diagram metadata.
///
/// Never fails on FlowLang content: missing attributes, unknown icons and
/// dangling connection endpoints all resolve to defaults.
pub fn parse(source: &str) -> Result<ParsedDiagram> {
    let patterns = patterns::patterns()?;

    let diagram_info = parse_header(patterns, source);
    let (nodes, name_to_id) = parse_nodes(patterns, source);
    let edges = parse_connections(patterns, source, &name_to_id);

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        title = diagram_info.title.as_deref(),
        "parsed FlowLang source"
    );

    Ok(ParsedDiagram {
        nodes,
        edges,
        diagram_info,
    })
}

/// Grid cell of the `n`th discovered node (zero-based).
pub fn grid_position(n: usize) -> Position {
    let column = (n % GRID_COLUMNS) as f64;
    let row = (n / GRID_COLUMNS) as f64;
    Position::new(
        GRID_ORIGIN + column * COLUMN_SPACING,
        GRID_ORIGIN + row * ROW_SPACING,
    )
}

/// Graph id of the `n`th discovered node named `name`.
pub fn node_id(name: &str, n: usize) -> String {
    format!("node-{name}-{n}")
}

// ============================================================================
// Header
// ============================================================================

fn parse_header(patterns: &Patterns, source: &str) -> DiagramInfo {
    let Some(attrs) = patterns
        .header
        .captures(source)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
    else {
        return DiagramInfo::default();
    };

    DiagramInfo {
        color: Patterns::capture(&patterns.header_color, attrs).map(|c| c.trim().to_string()),
        title: Patterns::capture(&patterns.header_title, attrs).map(str::to_string),
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// Discover node declarations; returns the nodes and the name → id table.
fn parse_nodes<'s>(patterns: &Patterns, source: &'s str) -> (Vec<Node>, HashMap<&'s str, String>) {
    let mut nodes = Vec::new();
    let mut name_to_id = HashMap::new();

    for caps in patterns.declaration.captures_iter(source) {
        let (Some(name), Some(attrs)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let (name, attrs) = (name.as_str(), attrs.as_str());
        if !attrs.contains(NODE_MARKER) {
            continue;
        }

        let kind = Patterns::capture(&patterns.attr_type, attrs)
            .map(str::trim)
            .unwrap_or(DEFAULT_KIND);
        let icon = Patterns::capture(&patterns.attr_icon, attrs)
            .map(str::trim)
            .unwrap_or(icons::DEFAULT_ICON_NAME);
        let label = Patterns::capture(&patterns.attr_label, attrs).unwrap_or(name);

        let n = nodes.len();
        let id = node_id(name, n);
        if let Some(previous) = name_to_id.insert(name, id.clone()) {
            tracing::trace!(name, previous = %previous, "name declared twice, keeping the later node");
        }

        nodes.push(Node {
            id,
            render_type: crate::model::NODE_RENDER_TYPE.to_string(),
            position: grid_position(n),
            data: node_data(kind, label, icons::name_to_glyph(icon)),
        });
    }

    (nodes, name_to_id)
}

// ============================================================================
// Connections
// ============================================================================

fn parse_connections(
    patterns: &Patterns,
    source: &str,
    name_to_id: &HashMap<&str, String>,
) -> Vec<Edge> {
    let mut edges = Vec::new();
    let mut seen = HashSet::new();

    for (style, regex) in &patterns.connections {
        for caps in regex.captures_iter(source) {
            let (Some(from), Some(to)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let source_id = resolve(name_to_id, from.as_str());
            let target_id = resolve(name_to_id, to.as_str());

            if !seen.insert(edge_key(&source_id, &target_id)) {
                tracing::trace!(%source_id, %target_id, ?style, "duplicate connection dropped");
                continue;
            }

            let label = caps.get(3).map(|m| m.as_str().trim()).unwrap_or_default();
            edges.push(Edge::styled(source_id, target_id).with_label(label));
        }
    }

    edges
}

fn resolve(name_to_id: &HashMap<&str, String>, name: &str) -> String {
    match name_to_id.get(name) {
        Some(id) => id.clone(),
        None => {
            tracing::trace!(name, "unresolved connection endpoint, using name as id");
            name.to_string()
        }
    }
}
