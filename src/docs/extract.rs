//! Metadata and section extraction straight from markdown source text.

use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::TOC_HEADING;
use super::slug::slugify;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^#\s+(.*)$").expect("valid title regex"));

static METADATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--\s*(\w+):\s*(.*?)\s*-->").expect("valid metadata regex")
});

static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?mR)^(#{2,3})\s+(?:<a id="([A-Za-z0-9_-]+)"></a>)?(.*)$"#)
        .expect("valid section regex")
});

/// Page metadata shown in navigation and page headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Metadata {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Directives embedded as `<!-- key: value -->` comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmbeddedMetadata {
    pub order: Option<i64>,
}

/// A level 2 or 3 heading, as listed in the documentation sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationSection {
    pub title: String,
    pub slug: String,
    pub level: u8,
}

/// Text of the first level-1 heading, or an empty string.
pub fn extract_title(content: &str) -> String {
    TITLE_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First paragraph line following the first `# ` heading.
pub fn extract_description(content: &str) -> Option<String> {
    let lines: Vec<&str> = content.split('\n').collect();

    for (i, line) in lines.iter().enumerate() {
        if !line.starts_with("# ") {
            continue;
        }
        for next in &lines[i + 1..] {
            let next = next.trim();
            if !next.is_empty() && !next.starts_with('#') {
                return Some(next.to_string());
            }
        }
    }

    None
}

pub fn extract_metadata(content: &str) -> EmbeddedMetadata {
    let mut metadata = EmbeddedMetadata::default();

    for caps in METADATA_RE.captures_iter(content) {
        let (key, value) = (&caps[1], &caps[2]);
        if key == "order" {
            metadata.order = parse_leading_int(value);
            if metadata.order.is_none() {
                warn!("Ignoring non-numeric order value {:?}", value);
            }
        }
    }

    metadata
}

/// Reads an optionally signed integer prefix, ignoring whatever follows it.
fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (sign, digits) = match value.as_bytes().first() {
        Some(b'-') => (-1, &value[1..]),
        Some(b'+') => (1, &value[1..]),
        _ => (1, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Level 2 and 3 headings in source order, excluding the table of contents
/// heading. An explicit `<a id="..."></a>` anchor provides the slug.
pub fn extract_sections(content: &str) -> Vec<DocumentationSection> {
    SECTION_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let level = caps[1].len() as u8;
            let title = caps[3].to_string();
            if title == TOC_HEADING {
                return None;
            }
            let slug = match caps.get(2) {
                Some(anchor) => anchor.as_str().to_string(),
                None => slugify(&title),
            };
            Some(DocumentationSection { title, slug, level })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_description() {
        let content = "# Getting Started\n\nSome text";
        assert_eq!(extract_title(content), "Getting Started");
        assert_eq!(extract_description(content).as_deref(), Some("Some text"));
    }

    #[test]
    fn test_title_anywhere_in_document() {
        let content = "<!-- order: 2 -->\n\nIntro\n\n# Troubleshooting\r\n\n## Linux\n";
        assert_eq!(extract_title(content), "Troubleshooting");
    }

    #[test]
    fn test_title_missing() {
        assert_eq!(extract_title("## Only sections\n\ntext"), "");
        assert_eq!(extract_description("## Only sections\n\ntext"), None);
    }

    #[test]
    fn test_description_skips_blank_lines_and_headings() {
        let content = "# Title\n\n   \n## Sub\n  First paragraph line.  \nsecond line\n";
        assert_eq!(
            extract_description(content).as_deref(),
            Some("First paragraph line.")
        );
    }

    #[test]
    fn test_description_missing_after_title() {
        assert_eq!(extract_description("# Title\n\n## A\n### B\n"), None);
    }

    #[test]
    fn test_metadata_order() {
        let content = "<!-- order: 10 -->\n# Title\n";
        assert_eq!(extract_metadata(content).order, Some(10));
    }

    #[test]
    fn test_metadata_unknown_keys_ignored() {
        let content = "<!-- author: someone -->\n<!--order:-3-->\n";
        assert_eq!(extract_metadata(content).order, Some(-3));
        assert_eq!(extract_metadata("<!-- author: x -->").order, None);
    }

    #[test]
    fn test_metadata_last_order_wins() {
        let content = "<!-- order: 1 -->\n<!-- order: 20 -->\n";
        assert_eq!(extract_metadata(content).order, Some(20));
    }

    #[test]
    fn test_metadata_malformed_order() {
        assert_eq!(extract_metadata("<!-- order: 15th -->").order, Some(15));
        assert_eq!(extract_metadata("<!-- order: first -->").order, None);
        assert_eq!(extract_metadata("<!-- order: -->").order, None);
    }

    #[test]
    fn test_sections() {
        let content = "# Doc\n\n## Table of Contents\n\n- [Install](#install)\n\n## Installation\n\n### <a id=\"win\"></a>Windows Setup\n\n#### Deep\n\n## What's New?\n";
        let sections = extract_sections(content);
        assert_eq!(
            sections,
            vec![
                DocumentationSection {
                    title: "Installation".into(),
                    slug: "installation".into(),
                    level: 2,
                },
                DocumentationSection {
                    title: "Windows Setup".into(),
                    slug: "win".into(),
                    level: 3,
                },
                DocumentationSection {
                    title: "What's New?".into(),
                    slug: "what's-new".into(),
                    level: 2,
                },
            ]
        );
    }
}
