//! Markdown to HTML rendering.
//!
//! The event stream from `pulldown_cmark` is regrouped into top-level blocks
//! so that sibling-level edits (dropping the inline table of contents) can be
//! made before headings are annotated with anchor ids and collected into the
//! [`TableOfContents`].

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use regex::Regex;
use std::sync::LazyLock;

use super::TOC_HEADING;
use super::slug::slugify;
use super::toc::{TableOfContents, TableOfContentsItem, TocBuilder};

/// Class attached to every anchored heading so it clears the sticky header.
pub const HEADING_CLASS: &str = "scroll-mt-16";

static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a id="([A-Za-z0-9_-]+)">"#).expect("valid anchor regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMarkdown {
    pub html: String,
    pub toc: TableOfContents,
}

/// A top-level node of the document and everything nested inside it.
struct Block<'a> {
    events: Vec<Event<'a>>,
}

impl<'a> Block<'a> {
    fn heading_level(&self) -> Option<HeadingLevel> {
        match self.events.first() {
            Some(Event::Start(Tag::Heading { level, .. })) => Some(*level),
            _ => None,
        }
    }

    fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Renders markdown to HTML, dropping the inline "Table of Contents" section
/// and giving every level 1-3 heading an anchor id.
///
/// Raw HTML in the source is passed through untouched.
pub fn render_markdown(markdown: &str) -> RenderedMarkdown {
    let mut blocks = split_blocks(Parser::new_ext(markdown, markdown_options()));
    remove_table_of_contents(&mut blocks);

    let events = blocks.into_iter().flat_map(|b| b.events).collect::<Vec<_>>();
    let (events, toc) = annotate_headings(events);

    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_output, events.into_iter());

    RenderedMarkdown {
        html: html_output,
        toc,
    }
}

fn split_blocks<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Block<'a>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    let mut depth = 0usize;

    for event in events {
        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
        current.push(event);
        if depth == 0 {
            blocks.push(Block {
                events: std::mem::take(&mut current),
            });
        }
    }
    if !current.is_empty() {
        blocks.push(Block { events: current });
    }

    blocks
}

/// Plain text of inline events, the way it reads to a user.
fn text_content(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(s) | Event::Code(s) | Event::Html(s) | Event::InlineHtml(s) => {
                text.push_str(s)
            }
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            _ => {}
        }
    }
    text
}

/// Inner events of a heading block, without its start and end tags.
fn heading_inner<'b, 'a>(block: &'b Block<'a>) -> &'b [Event<'a>] {
    let len = block.events.len();
    if len >= 2 {
        &block.events[1..len - 1]
    } else {
        &[]
    }
}

/// Drops every "Table of Contents" heading together with the nodes after
/// it, up to the next heading. A heading that opens the document is kept.
fn remove_table_of_contents(blocks: &mut Vec<Block<'_>>) {
    let mut index = 1;
    while index < blocks.len() {
        let is_toc = blocks[index].is_heading()
            && text_content(heading_inner(&blocks[index])) == TOC_HEADING;
        if !is_toc {
            index += 1;
            continue;
        }

        let end = blocks[index + 1..]
            .iter()
            .position(Block::is_heading)
            .map_or(blocks.len(), |offset| index + 1 + offset);
        blocks.drain(index..end);
    }
}

fn is_html(event: &Event<'_>) -> bool {
    matches!(event, Event::Html(_) | Event::InlineHtml(_))
}

fn annotate_headings(events: Vec<Event<'_>>) -> (Vec<Event<'_>>, TableOfContents) {
    let mut builder = TocBuilder::new();
    let mut output = Vec::with_capacity(events.len());
    let mut events = events.into_iter();

    while let Some(event) = events.next() {
        let (level, id, classes, attrs) = match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => (level, id, classes, attrs),
            other => {
                output.push(other);
                continue;
            }
        };

        let mut inner = Vec::new();
        let mut end = None;
        for next in events.by_ref() {
            if let Event::End(TagEnd::Heading(_)) = next {
                end = Some(next);
                break;
            }
            inner.push(next);
        }

        let depth = level as u8;
        if depth > 3 {
            output.push(Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }));
            output.extend(inner);
            output.extend(end);
            continue;
        }

        let anchor = match inner.first() {
            Some(Event::Html(marker) | Event::InlineHtml(marker)) => ANCHOR_RE
                .captures(marker)
                .map(|caps| caps[1].to_string()),
            _ => None,
        };

        let (text, slug) = match anchor {
            Some(slug) => {
                let visible = inner.iter().position(|e| !is_html(e)).unwrap_or(inner.len());
                inner.drain(..visible);
                (text_content(&inner), slug)
            }
            None => {
                let text = text_content(&inner);
                let slug = slugify(&text);
                (text, slug)
            }
        };

        builder.push(TableOfContentsItem::new(text, &slug, depth));

        output.push(Event::Start(Tag::Heading {
            level,
            id: Some(CowStr::from(slug)),
            classes: vec![CowStr::Borrowed(HEADING_CLASS)],
            attrs,
        }));
        output.extend(inner);
        output.extend(end);
    }

    (output, builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_get_ids() {
        let rendered = render_markdown("# Getting Started\n\nSome text\n\n## Use `codium` CLI\n");
        assert!(
            rendered
                .html
                .contains(r#"<h1 id="getting-started" class="scroll-mt-16">Getting Started</h1>"#)
        );
        assert!(rendered.html.contains(
            r#"<h2 id="use-codium-cli" class="scroll-mt-16">Use <code>codium</code> CLI</h2>"#
        ));
        assert!(rendered.html.contains("<p>Some text</p>"));
        assert_eq!(rendered.toc.items[0].items[0].title, "Use codium CLI");
    }

    #[test]
    fn test_explicit_anchor_is_used_verbatim() {
        let rendered = render_markdown("## <a id=\"linux-install\"></a>Installing on Linux\n");
        assert!(rendered.html.contains(
            r#"<h2 id="linux-install" class="scroll-mt-16">Installing on Linux</h2>"#
        ));
        assert_eq!(
            rendered.toc.items,
            vec![TableOfContentsItem::new("Installing on Linux", "linux-install", 2)]
        );
    }

    #[test]
    fn test_deep_headings_untouched() {
        let rendered = render_markdown("# Doc\n\n#### Detail\n");
        assert!(rendered.html.contains("<h4>Detail</h4>"));
        assert!(rendered.toc.items[0].items.is_empty());
    }

    #[test]
    fn test_table_of_contents_section_removed() {
        let markdown = "# Doc\n\n## Table of Contents\n\n- [Installation](#installation)\n- [Usage](#usage)\n\n## Installation\n\nRun it.\n\n## Usage\n";
        let rendered = render_markdown(markdown);

        assert!(!rendered.html.contains("Table of Contents"));
        assert!(!rendered.html.contains(r##"href="#usage""##));
        assert!(rendered.html.contains(r#"<h2 id="installation" class="scroll-mt-16">"#));
        assert!(rendered.html.contains("<p>Run it.</p>"));

        let children: Vec<_> = rendered.toc.items[0]
            .items
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(children, vec!["Installation", "Usage"]);
    }

    #[test]
    fn test_table_of_contents_at_end_removes_rest() {
        let rendered = render_markdown("<!-- order: 1 -->\n\n## Table of Contents\n\n* one\n\n* two\n");
        assert!(!rendered.html.contains("Table of Contents"));
        assert!(!rendered.html.contains("<li>"));
        assert!(rendered.html.contains("<!-- order: 1 -->"));
        assert!(rendered.toc.items.is_empty());
    }

    #[test]
    fn test_every_table_of_contents_section_removed() {
        let markdown = "# A\n\n## Table of Contents\n\n- x\n\n## Table of Contents\n\n- y\n\n## B\n";
        let rendered = render_markdown(markdown);
        assert!(!rendered.html.contains("Table of Contents"));
        assert!(!rendered.html.contains("<li>"));
        assert_eq!(rendered.toc.items[0].items.len(), 1);
    }

    #[test]
    fn test_leading_table_of_contents_is_kept() {
        let rendered = render_markdown("## Table of Contents\n\n- a\n\n## Next\n");
        assert!(rendered.html.contains("Table of Contents"));
        assert!(rendered.html.contains("<li>a</li>"));
        assert_eq!(rendered.toc.items[0].url, "#table-of-contents");
    }

    #[test]
    fn test_gfm_extensions() {
        let markdown = "| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~\n\n- [x] done\n- [ ] todo\n";
        let rendered = render_markdown(markdown);
        assert!(rendered.html.contains("<table>"));
        assert!(rendered.html.contains("<del>old</del>"));
        assert!(rendered.html.contains(r#"type="checkbox""#));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let rendered = render_markdown("<div class=\"note\">\nhello\n</div>\n");
        assert!(rendered.html.contains("<div class=\"note\">"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let markdown = "# T\n\n## Table of Contents\n\n- a\n\n## S\n\n### <a id=\"x\"></a>Sub\n";
        assert_eq!(render_markdown(markdown), render_markdown(markdown));
    }

    #[test]
    fn test_nested_headings_are_collected() {
        let rendered = render_markdown("# Doc\n\n> ## Quoted\n");
        assert!(rendered.html.contains(r#"<h2 id="quoted" class="scroll-mt-16">Quoted</h2>"#));
        assert_eq!(rendered.toc.items[0].items[0].title, "Quoted");
    }

    #[test]
    fn test_leading_non_anchor_html_is_slugified() {
        let rendered = render_markdown("## <b>Bold</b> move\n");
        assert!(rendered.html.contains(
            r#"<h2 id="lessbgreaterboldlessbgreater-move" class="scroll-mt-16"><b>Bold</b> move</h2>"#
        ));
        assert_eq!(rendered.toc.items[0].title, "<b>Bold</b> move");
    }

    #[test]
    fn test_multiline_setext_heading_keeps_line_break() {
        let rendered = render_markdown("# Doc\n\nInstall\nOn Linux\n--------\n");
        assert!(rendered.html.contains(r#"<h2 id="install-on-linux" class="scroll-mt-16">"#));
        assert_eq!(rendered.toc.items[0].items[0].title, "Install\nOn Linux");
        assert_eq!(rendered.toc.items[0].items[0].url, "#install-on-linux");
    }

    #[test]
    fn test_heading_without_slug_characters_gets_fallback_id() {
        let rendered = render_markdown("## ???\n");
        assert!(rendered.html.contains(r#"<h2 id="section" class="scroll-mt-16">???</h2>"#));
        assert_eq!(rendered.toc.items[0].url, format!("#{}", crate::docs::FALLBACK_SLUG));
    }
}
