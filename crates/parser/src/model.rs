//! Graph-side data model shared with the visual editor.
//!
//! All types serialize to the camelCase JSON the editor exchanges, so a node
//! round-trips through the browser unchanged. Optional fields stay optional
//! here; default-fill happens where a consumer needs a value (see the
//! accessor methods and the serializer).

use serde::{Deserialize, Serialize};

use crate::icons;

/// Node kind assumed when a node carries none.
pub const DEFAULT_KIND: &str = "activity";

/// Render type the editor uses for every FlowLang node.
pub const NODE_RENDER_TYPE: &str = "custom";

/// Render type the editor uses for every FlowLang edge.
pub const EDGE_RENDER_TYPE: &str = "smoothstep";

/// Stroke colour shared by edges and arrow markers.
pub const EDGE_STROKE: &str = "#6B7280";

fn default_node_type() -> String {
    NODE_RENDER_TYPE.to_string()
}

fn default_edge_type() -> String {
    EDGE_RENDER_TYPE.to_string()
}

/// A position on the editor canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A diagram node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Graph-side identifier, unique within a diagram.
    #[serde(default)]
    pub id: String,
    /// Editor render type, always `custom` for FlowLang nodes.
    #[serde(rename = "type", default = "default_node_type")]
    pub render_type: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: NodeData,
}

/// Semantic and display payload of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Semantic kind: `event`, `activity`, `note`, `decision` or anything else.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// The glyph, not the symbolic name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
    /// Legacy mirror of `icon_color` kept for older editor builds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    // Appearance overrides set from the editor's style panel. FlowLang text
    // does not carry them; only exports read them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// `rectangle` (default), `rounded`, `circle` or `diamond`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
}

impl Node {
    /// Kind of the node, defaulting to `activity`.
    pub fn kind(&self) -> &str {
        self.data.kind.as_deref().unwrap_or(DEFAULT_KIND)
    }

    /// Label of the node, defaulting to its id.
    pub fn label(&self) -> &str {
        self.data.label.as_deref().unwrap_or(&self.id)
    }

    /// Glyph of the node, defaulting to ⚪.
    pub fn glyph(&self) -> &str {
        self.data.icon.as_deref().unwrap_or(icons::DEFAULT_GLYPH)
    }

    /// Symbolic icon name, resolved through the reverse icon table.
    pub fn icon_name(&self) -> &'static str {
        icons::glyph_to_name(self.glyph())
    }
}

/// Stroke styling of an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeStyle {
    pub stroke: String,
    pub stroke_width: f64,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            stroke: EDGE_STROKE.to_string(),
            stroke_width: 2.0,
        }
    }
}

/// Arrow marker drawn at the target end of an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerEnd {
    #[serde(rename = "type")]
    pub marker_type: String,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Default for MarkerEnd {
    fn default() -> Self {
        Self {
            marker_type: "arrowclosed".to_string(),
            width: 20.0,
            height: 20.0,
            color: Some(EDGE_STROKE.to_string()),
        }
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// `source + "-" + target`; the deduplication key.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
    /// Empty when the edge has no label.
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default = "default_edge_type")]
    pub render_type: String,
    #[serde(default)]
    pub animated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<EdgeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_end: Option<MarkerEnd>,
}

impl Edge {
    /// Build an edge with the fixed display styling.
    pub fn styled(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: edge_key(&source, &target),
            source,
            target,
            label: String::new(),
            render_type: default_edge_type(),
            animated: false,
            style: Some(EdgeStyle::default()),
            marker_end: Some(MarkerEnd::default()),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    pub fn has_label(&self) -> bool {
        !self.label.is_empty()
    }
}

/// Deduplication key of a connection.
pub fn edge_key(source: &str, target: &str) -> String {
    format!("{source}-{target}")
}

/// Metadata from the outermost diagram declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Result of parsing FlowLang source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDiagram {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub diagram_info: DiagramInfo,
}
