//! Graph rendering utilities.
//!
//! This module provides output formats for exporting DiagramGraph structures:
//! - SVG matching the editor's image export
//! - GraphML export for external visualization tools

mod graphml;
mod svg;

pub use graphml::render_graphml;
pub use svg::{render_svg, NODE_HEIGHT, NODE_WIDTH, PADDING};

/// Escape special XML characters.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hello""#), "say &quot;hello&quot;");
    }
}
