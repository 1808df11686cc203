//! Scanning patterns for FlowLang source.
//!
//! FlowLang is regular enough to be scanned rather than parsed: every
//! construct is found by matching its pattern over the whole source, in
//! textual order, with non-overlapping leftmost matches. The patterns are
//! compiled once per process and shared by every parse call.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::Result;
use crate::model::Edge;

/// `Name [attrs] {`: the diagram declaration.
const HEADER: &str = r"([A-Za-z0-9_]+)\s*\[([^\]]+)\]\s*\{";
const HEADER_COLOR: &str = r"color:\s*([^,}]+)";
const HEADER_TITLE: &str = r#"title:\s*"([^"]+)""#;

/// `Name [attrs]`: any declaration, including the diagram header.
const DECLARATION: &str = r"([A-Za-z0-9_]+)\s*\[([^\]]+)\]";
const ATTR_TYPE: &str = r"type:\s*([^,\]]+)";
const ATTR_ICON: &str = r"icon:\s*([^,\]]+)";
const ATTR_LABEL: &str = r#"label:\s*"([^"]+)""#;

const EMPHASIZED: &str = r"([A-Za-z0-9_]+)\s*\*\*>\*\*\s*([A-Za-z0-9_]+)(?:\s*:\s*([^:\n\[]+))?";
const LABELED: &str = r"([A-Za-z0-9_]+)\s*-->\s*([A-Za-z0-9_]+)\s*:\s*([^:\n]+)";
const PLAIN: &str = r"([A-Za-z0-9_]+)\s*>\s*([A-Za-z0-9_]+)(?:\s*:\s*([^:\n\[]+))?";

/// The three connection syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionStyle {
    /// `A **>** B`, optionally `: label`; written for animated edges.
    Emphasized,
    /// `A --> B : label`; the label is mandatory.
    Labeled,
    /// `A > B`, optionally `: label`.
    Plain,
}

impl ConnectionStyle {
    /// Scan order; the first connection seen for a node pair wins.
    pub const PRIORITY: [ConnectionStyle; 3] = [
        ConnectionStyle::Emphasized,
        ConnectionStyle::Labeled,
        ConnectionStyle::Plain,
    ];

    /// Syntax the serializer writes for `edge`: animation first, then label.
    pub fn for_edge(edge: &Edge) -> Self {
        if edge.animated {
            ConnectionStyle::Emphasized
        } else if edge.has_label() {
            ConnectionStyle::Labeled
        } else {
            ConnectionStyle::Plain
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            ConnectionStyle::Emphasized => "**>**",
            ConnectionStyle::Labeled => "-->",
            ConnectionStyle::Plain => ">",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            ConnectionStyle::Emphasized => EMPHASIZED,
            ConnectionStyle::Labeled => LABELED,
            ConnectionStyle::Plain => PLAIN,
        }
    }
}

/// All compiled patterns.
#[derive(Debug)]
pub(crate) struct Patterns {
    pub header: Regex,
    pub header_color: Regex,
    pub header_title: Regex,
    pub declaration: Regex,
    pub attr_type: Regex,
    pub attr_icon: Regex,
    pub attr_label: Regex,
    /// Indexed in [`ConnectionStyle::PRIORITY`] order.
    pub connections: [(ConnectionStyle, Regex); 3],
}

impl Patterns {
    fn compile() -> Result<Self> {
        let [first, second, third] = ConnectionStyle::PRIORITY;
        Ok(Self {
            header: Regex::new(HEADER)?,
            header_color: Regex::new(HEADER_COLOR)?,
            header_title: Regex::new(HEADER_TITLE)?,
            declaration: Regex::new(DECLARATION)?,
            attr_type: Regex::new(ATTR_TYPE)?,
            attr_icon: Regex::new(ATTR_ICON)?,
            attr_label: Regex::new(ATTR_LABEL)?,
            connections: [
                (first, Regex::new(first.pattern())?),
                (second, Regex::new(second.pattern())?),
                (third, Regex::new(third.pattern())?),
            ],
        })
    }

    /// First capture group of `regex` in `haystack`.
    pub fn capture<'h>(regex: &Regex, haystack: &'h str) -> Option<&'h str> {
        regex
            .captures(haystack)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

/// The process-wide compiled patterns.
pub(crate) fn patterns() -> Result<&'static Patterns> {
    if let Some(patterns) = PATTERNS.get() {
        return Ok(patterns);
    }
    let compiled = Patterns::compile()?;
    Ok(PATTERNS.get_or_init(|| compiled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile_once() {
        let first = patterns().unwrap() as *const Patterns;
        let second = patterns().unwrap() as *const Patterns;
        assert_eq!(first, second);
    }

    #[test]
    fn test_plain_does_not_match_other_arrows() {
        let p = patterns().unwrap();
        let plain = &p.connections[2].1;
        assert!(!plain.is_match("A --> B : ok"));
        assert!(!plain.is_match("A **>** B"));
        assert!(plain.is_match("A > B"));
    }

    #[test]
    fn test_labeled_requires_label() {
        let p = patterns().unwrap();
        let labeled = &p.connections[1].1;
        assert!(!labeled.is_match("A --> B"));
        assert!(labeled.is_match("A --> B : maybe"));
    }

    #[test]
    fn test_style_for_edge() {
        let edge = Edge::styled("a", "b");
        assert_eq!(ConnectionStyle::for_edge(&edge), ConnectionStyle::Plain);
        let edge = edge.with_label("x");
        assert_eq!(ConnectionStyle::for_edge(&edge), ConnectionStyle::Labeled);
        let edge = edge.animated(true);
        assert_eq!(ConnectionStyle::for_edge(&edge), ConnectionStyle::Emphasized);
        assert_eq!(ConnectionStyle::Emphasized.arrow(), "**>**");
    }
}
