//! Display colours and editor defaults per node kind.

use crate::model::{Node, NodeData, Position, NODE_RENDER_TYPE};

/// Colours a node of a given kind is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindColors {
    pub background: &'static str,
    pub text: &'static str,
    pub icon: &'static str,
}

impl KindColors {
    /// Colours for `kind`; unknown kinds get the neutral grey set.
    pub fn for_kind(kind: &str) -> Self {
        match kind {
            "event" => Self {
                background: "#F0FDF4",
                text: "#166534",
                icon: "#16A34A",
            },
            "activity" => Self {
                background: "#FFF7ED",
                text: "#EA580C",
                icon: "#F97316",
            },
            "note" => Self {
                background: "#FAF5FF",
                text: "#7C3AED",
                icon: "#8B5CF6",
            },
            "decision" => Self {
                background: "#EFF6FF",
                text: "#2563EB",
                icon: "#3B82F6",
            },
            _ => Self {
                background: "#F9FAFB",
                text: "#374151",
                icon: "#6B7280",
            },
        }
    }
}

/// Glyph the editor gives a freshly added node of `kind`.
pub fn default_glyph(kind: &str) -> &'static str {
    match kind {
        "event" => "\u{1F6A9}",
        "activity" => "\u{2699}\u{FE0F}",
        "note" => "\u{1F4DD}",
        "decision" => "\u{1F48E}",
        _ => "\u{26AA}",
    }
}

/// Fill in label, kind, icon and derived colours for a node.
pub fn node_data(kind: &str, label: impl Into<String>, glyph: impl Into<String>) -> NodeData {
    let colors = KindColors::for_kind(kind);
    NodeData {
        label: Some(label.into()),
        kind: Some(kind.to_string()),
        icon: Some(glyph.into()),
        background_color: Some(colors.background.to_string()),
        text_color: Some(colors.text.to_string()),
        icon_color: Some(colors.icon.to_string()),
        color: Some(colors.icon.to_string()),
        ..NodeData::default()
    }
}

/// A node as the editor creates it from its toolbar: `node-<counter>`,
/// placeholder label `New <kind>` and the kind's default glyph.
pub fn new_node(kind: &str, counter: u64, position: Position) -> Node {
    Node {
        id: format!("node-{counter}"),
        render_type: NODE_RENDER_TYPE.to_string(),
        position,
        data: node_data(kind, format!("New {kind}"), default_glyph(kind)),
    }
}
