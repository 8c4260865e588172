//! # Style Resolution
//!
//! A widget's `styles` text is either inline rules or the URL of an external
//! stylesheet. Anything containing a block delimiter (`{`) is inline.
//!
//! Inline rules are usually written as an indented raw string inside the
//! widget's source, so the indentation of the first non-blank line is stripped
//! from every line. The result only depends on relative indentation:
//!
//! ```text
//! "\n        :host {\n            display: block;\n        }\n    "
//! "\n    :host {\n        display: block;\n    }\n"
//!                  ↓ both resolve to ↓
//! ":host {\n    display: block;\n}\n"
//! ```

use crate::error::Result;
use crate::host::RenderRoot;

/// Resolved form of a widget's `styles` text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSource {
    /// Inline rules, indentation stripped
    Inline(String),

    /// URL of an external stylesheet
    Link(String),
}

impl StyleSource {
    /// Create the matching detached node on the root.
    pub fn create_node<R: RenderRoot>(&self, root: &mut R) -> Result<R::Node> {
        match self {
            StyleSource::Inline(css) => root.create_style(css),
            StyleSource::Link(href) => root.create_link(href),
        }
    }
}

/// Classify a widget's `styles` text. Blank text means no stylesheet.
///
/// A link's URL is trimmed of surrounding whitespace.
pub fn resolve_styles(styles: &str) -> Option<StyleSource> {
    if styles.trim().is_empty() {
        return None;
    }
    let source = if styles.contains('{') {
        StyleSource::Inline(strip_indent(styles))
    } else {
        StyleSource::Link(styles.trim().to_string())
    };
    Some(source)
}

/// Remove the first non-blank line's indentation from every line and trim
/// trailing whitespace. Lines indented less than the prefix keep their text.
pub fn strip_indent(text: &str) -> String {
    let indent = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| &line[..line.len() - line.trim_start_matches([' ', '\t']).len()])
        .unwrap_or("");

    text.trim_start()
        .split('\n')
        .map(|line| line.strip_prefix(indent).unwrap_or(line).trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemoryRoot, NodeKind};

    #[test]
    fn inline_rules_are_detected_by_brace() {
        assert!(matches!(
            resolve_styles("p { color: red }"),
            Some(StyleSource::Inline(_))
        ));
        assert_eq!(
            resolve_styles("  ./widget.css \n"),
            Some(StyleSource::Link("./widget.css".into()))
        );
        assert_eq!(
            resolve_styles("https://cdn.example.com/menu.css"),
            Some(StyleSource::Link("https://cdn.example.com/menu.css".into()))
        );
    }

    #[test]
    fn blank_styles_resolve_to_nothing() {
        assert_eq!(resolve_styles(""), None);
        assert_eq!(resolve_styles("  \n\t "), None);
    }

    #[test]
    fn indentation_depth_does_not_change_output() {
        let deep = "\n        :host {\n            display: block;\n        }\n\n        .item { margin: 0; }\n    ";
        let shallow = "\n    :host {\n        display: block;\n    }\n\n    .item { margin: 0; }\n";
        let expected = ":host {\n    display: block;\n}\n\n.item { margin: 0; }\n";
        assert_eq!(strip_indent(deep), expected);
        assert_eq!(strip_indent(shallow), expected);
        assert_eq!(resolve_styles(deep), resolve_styles(shallow));
    }

    #[test]
    fn tabs_are_stripped_like_spaces() {
        let css = "\n\t\tp {\n\t\t\tcolor: red;\n\t\t}";
        assert_eq!(strip_indent(css), "p {\n\tcolor: red;\n}");
    }

    #[test]
    fn trailing_whitespace_is_removed_per_line() {
        assert_eq!(strip_indent("a {   \n  b: c;  \n}  "), "a {\n  b: c;\n}");
    }

    #[test]
    fn leading_blank_lines_with_spaces_are_skipped() {
        let css = "   \n    p {\n      x: y;\n    }";
        assert_eq!(strip_indent(css), "p {\n  x: y;\n}");
    }

    #[test]
    fn under_indented_lines_are_kept() {
        let css = "    p {\n  x: y;\n    }";
        assert_eq!(strip_indent(css), "p {\n  x: y;\n}");
    }

    #[test]
    fn create_node_matches_source() {
        let mut root = MemoryRoot::new();
        let inline = resolve_styles("p {}").unwrap().create_node(&mut root).unwrap();
        let link = resolve_styles("a.css").unwrap().create_node(&mut root).unwrap();
        assert_eq!(root.kind(inline), Some(NodeKind::Style("p {}".into())));
        assert_eq!(root.kind(link), Some(NodeKind::Link("a.css".into())));
    }
}
