//! Table of contents extraction

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref HEADING_RE: Regex = Regex::new(r"(?m)^(#{1,6})[ \t]+(.+?)[ \t]*$").unwrap();
}

/// One entry in a table of contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocItem {
    /// Heading text
    pub title: String,

    /// Fragment link, e.g. "#getting-started"
    pub url: String,

    /// Heading level (1-3)
    pub level: usize,

    /// Nested entries. Reserved; the current design emits a flat list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<TocItem>,
}

/// Ordered table of contents for one post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableOfContents {
    pub items: Vec<TocItem>,
}

/// Anchor id for a heading: lower-cased, with non-alphanumeric runs
/// collapsed to single hyphens. Shared by the markdown renderer and
/// [`generate_toc`] so fragment links always match the rendered ids.
pub fn heading_anchor(text: &str) -> String {
    slug::slugify(text)
}

/// Extract a table of contents from a raw markdown body.
///
/// Scans for lines starting with 1-3 `#` characters; deeper headings are
/// ignored. Entries come out flat, in document order.
pub fn generate_toc(content: &str) -> TableOfContents {
    let items = HEADING_RE
        .captures_iter(content)
        .filter(|cap| cap[1].len() <= 3)
        .map(|cap| {
            let title = cap[2].trim().to_string();
            let url = format!("#{}", heading_anchor(&title));
            TocItem {
                title,
                url,
                level: cap[1].len(),
                items: Vec::new(),
            }
        })
        .collect();

    TableOfContents { items }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_toc_document_order() {
        let toc = generate_toc("# Intro\n\nText\n\n## Details\n");
        assert_eq!(toc.items.len(), 2);
        assert_eq!(toc.items[0].title, "Intro");
        assert_eq!(toc.items[0].level, 1);
        assert_eq!(toc.items[0].url, "#intro");
        assert_eq!(toc.items[1].title, "Details");
        assert_eq!(toc.items[1].level, 2);
        assert_eq!(toc.items[1].url, "#details");
    }

    #[test]
    fn test_generate_toc_ignores_deep_headings() {
        let toc = generate_toc("# A\n#### Too deep\n##### Deeper\n### C\n");
        let levels: Vec<_> = toc.items.iter().map(|i| i.level).collect();
        assert_eq!(levels, vec![1, 3]);
    }

    #[test]
    fn test_generate_toc_requires_heading_space() {
        let toc = generate_toc("#NoSpace\n# Spaced\n");
        assert_eq!(toc.items.len(), 1);
        assert_eq!(toc.items[0].title, "Spaced");
    }

    #[test]
    fn test_generate_toc_empty_body() {
        let toc = generate_toc("No headings here.\n");
        assert!(toc.items.is_empty());
    }

    #[test]
    fn test_heading_anchor_collapses_punctuation() {
        assert_eq!(heading_anchor("Hello, World!"), "hello-world");
        assert_eq!(heading_anchor("Getting  Started"), "getting-started");
        assert_eq!(heading_anchor("API v2.0"), "api-v2-0");
    }

    #[test]
    fn test_heading_anchor_deterministic() {
        let a = heading_anchor("Some Section Title");
        let b = heading_anchor("Some Section Title");
        assert_eq!(a, b);
        assert_eq!(heading_anchor(&a), a);
    }
}
