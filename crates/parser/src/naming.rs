//! FlowLang names: the symbolic identifiers used in source text.
//!
//! A name is derived from a node's label when the label is meaningful and
//! from its graph id otherwise. Collisions are not detected; when two nodes
//! derive the same name the parser's name table keeps the last one.

/// Name returned when nothing usable is left after cleaning.
const FALLBACK_NAME: &str = "Node";

/// Prefix of the ids the editor assigns to nodes it creates.
const EDITOR_ID_PREFIX: &str = "node-";

/// Prefix of the placeholder labels the editor assigns (`New event`, ...).
const PLACEHOLDER_LABEL_PREFIX: &str = "New ";

/// Derive the FlowLang name for a node.
///
/// ```rust
/// use flowlang_parser::naming::flowlang_name;
///
/// assert_eq!(flowlang_name("node-3-activity", "Review Document"), "reviewDocument");
/// assert_eq!(flowlang_name("node-7", "New Node"), "node7");
/// ```
pub fn flowlang_name(id: &str, label: &str) -> String {
    let mut text = if !label.is_empty() && label != id && !label.starts_with(PLACEHOLDER_LABEL_PREFIX)
    {
        label
    } else {
        id
    };

    if text.starts_with(EDITOR_ID_PREFIX) {
        // `node-<part>-<rest>`: keep only the part after the prefix.
        if let Some(part) = text.split('-').nth(1) {
            text = part;
        }
    }

    let mut parts = text.split(|c: char| !c.is_ascii_alphanumeric());
    let first = match parts.next() {
        Some(first) if !first.is_empty() => first,
        _ => return FALLBACK_NAME.to_string(),
    };

    let mut name = first.to_ascii_lowercase();
    for part in parts.filter(|p| !p.is_empty()) {
        name.push_str(&capitalize(part));
    }

    if !name.starts_with(|c: char| c.is_alphabetic()) {
        name = format!("node{}", capitalize(&name));
    }
    name
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
