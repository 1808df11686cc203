//! Icon registry: symbolic icon names and the glyphs the editor renders.
//!
//! FlowLang source refers to icons by name (`icon: database`), the editor
//! stores the glyph itself. The two lookup tables below are independent
//! literals and are deliberately *not* exact inverses:
//!
//! - `filter` and `search` share 🔍, `cpu` and `code` share 💻. The reverse
//!   table only knows `filter` and `cpu`, so `search` and `code` do not
//!   survive a round trip.
//! - The reverse table accepts 📝 (note) and 💎 (decision), the editor's
//!   default glyphs, which have no forward entry of their own.
//!
//! Round-trip fidelity of existing diagrams depends on these exact entries.

/// Name used whenever a glyph is unknown.
pub const DEFAULT_ICON_NAME: &str = "circle";

/// Glyph used whenever an icon name is unknown (⚪).
pub const DEFAULT_GLYPH: &str = "\u{26AA}";

/// Icon name → glyph.
static NAME_TO_GLYPH: &[(&str, &str)] = &[
    ("file-text", "\u{1F4C4}"),
    ("filter", "\u{1F50D}"),
    ("layers", "\u{1F4DA}"),
    ("database", "\u{1F5C4}\u{FE0F}"),
    ("flag", "\u{1F6A9}"),
    ("alert-triangle", "\u{26A0}\u{FE0F}"),
    ("archive", "\u{1F4E6}"),
    ("lightbulb", "\u{1F4A1}"),
    ("users", "\u{1F465}"),
    ("magnet", "\u{1F9F2}"),
    ("lightning", "\u{26A1}"),
    ("bar-chart-2", "\u{1F4CA}"),
    ("pie-chart", "\u{1F967}"),
    ("file", "\u{1F4C1}"),
    ("cpu", "\u{1F4BB}"),
    ("clock", "\u{1F552}"),
    ("shield", "\u{1F6E1}\u{FE0F}"),
    ("code", "\u{1F4BB}"),
    ("grid", "\u{268F}"),
    ("play", "\u{25B6}\u{FE0F}"),
    ("pause", "\u{23F8}\u{FE0F}"),
    ("stop", "\u{23F9}\u{FE0F}"),
    ("settings", "\u{2699}\u{FE0F}"),
    ("check", "\u{2705}"),
    ("x", "\u{274C}"),
    ("arrow-right", "\u{27A1}\u{FE0F}"),
    ("arrow-left", "\u{2B05}\u{FE0F}"),
    ("upload", "\u{2B06}\u{FE0F}"),
    ("download", "\u{2B07}\u{FE0F}"),
    ("refresh", "\u{1F504}"),
    ("search", "\u{1F50D}"),
    ("bell", "\u{1F514}"),
    ("circle", "\u{26AA}"),
];

/// Glyph → icon name.
static GLYPH_TO_NAME: &[(&str, &str)] = &[
    ("\u{1F4C4}", "file-text"),
    ("\u{1F50D}", "filter"),
    ("\u{1F4DA}", "layers"),
    ("\u{1F5C4}\u{FE0F}", "database"),
    ("\u{1F6A9}", "flag"),
    ("\u{26A0}\u{FE0F}", "alert-triangle"),
    ("\u{1F4E6}", "archive"),
    ("\u{1F4A1}", "lightbulb"),
    ("\u{1F465}", "users"),
    ("\u{1F9F2}", "magnet"),
    ("\u{26A1}", "lightning"),
    ("\u{1F4CA}", "bar-chart-2"),
    ("\u{1F967}", "pie-chart"),
    ("\u{1F4C1}", "file"),
    ("\u{1F4BB}", "cpu"),
    ("\u{1F552}", "clock"),
    ("\u{1F6E1}\u{FE0F}", "shield"),
    ("\u{268F}", "grid"),
    ("\u{25B6}\u{FE0F}", "play"),
    ("\u{23F8}\u{FE0F}", "pause"),
    ("\u{23F9}\u{FE0F}", "stop"),
    ("\u{2699}\u{FE0F}", "settings"),
    ("\u{2705}", "check"),
    ("\u{274C}", "x"),
    ("\u{27A1}\u{FE0F}", "arrow-right"),
    ("\u{2B05}\u{FE0F}", "arrow-left"),
    ("\u{2B06}\u{FE0F}", "upload"),
    ("\u{2B07}\u{FE0F}", "download"),
    ("\u{1F504}", "refresh"),
    ("\u{1F514}", "bell"),
    ("\u{26AA}", "circle"),
    ("\u{1F4DD}", "file-text"),
    ("\u{1F48E}", "settings"),
];

/// Look up the glyph for a symbolic icon name, falling back to ⚪.
pub fn name_to_glyph(name: &str) -> &'static str {
    NAME_TO_GLYPH
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, glyph)| *glyph)
        .unwrap_or(DEFAULT_GLYPH)
}

/// Look up the symbolic name for a glyph, falling back to `"circle"`.
pub fn glyph_to_name(glyph: &str) -> &'static str {
    GLYPH_TO_NAME
        .iter()
        .find(|(g, _)| *g == glyph)
        .map(|(_, name)| *name)
        .unwrap_or(DEFAULT_ICON_NAME)
}

/// All icon names the registry knows, in table order.
pub fn icon_names() -> impl Iterator<Item = &'static str> {
    NAME_TO_GLYPH.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_resolve() {
        assert_eq!(name_to_glyph("flag"), "🚩");
        assert_eq!(name_to_glyph("database"), "🗄️");
        assert_eq!(name_to_glyph("settings"), "⚙️");
    }

    #[test]
    fn test_unknown_defaults() {
        assert_eq!(name_to_glyph("totally-unknown"), DEFAULT_GLYPH);
        assert_eq!(glyph_to_name("🦀"), "circle");
        assert_eq!(glyph_to_name(""), "circle");
    }

    #[test]
    fn test_roundtrip_follows_reverse_table() {
        for name in icon_names() {
            let back = glyph_to_name(name_to_glyph(name));
            match name {
                "search" => assert_eq!(back, "filter"),
                "code" => assert_eq!(back, "cpu"),
                _ => assert_eq!(back, name, "icon {name} should round-trip"),
            }
        }
    }

    #[test]
    fn test_reverse_only_glyphs() {
        assert_eq!(glyph_to_name("📝"), "file-text");
        assert_eq!(glyph_to_name("💎"), "settings");
    }

    #[test]
    fn test_variation_selector_is_significant() {
        // The bare gear without U+FE0F is not in the table.
        assert_eq!(glyph_to_name("\u{2699}"), "circle");
    }
}
