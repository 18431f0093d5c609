//! Documentation pipeline.
//!
//! Turns one markdown document into rendered HTML, page metadata, a flat list
//! of sections for navigation, and a nested table of contents. Every function
//! here is pure: the same input always yields the same page.

mod extract;
mod render;
mod slug;
mod toc;

use serde::{Deserialize, Serialize};

pub use extract::{
    DocumentationSection, EmbeddedMetadata, Metadata, extract_description, extract_metadata,
    extract_sections, extract_title,
};
pub use render::{HEADING_CLASS, RenderedMarkdown, render_markdown};
pub use slug::{FALLBACK_SLUG, slugify};
pub use toc::{TableOfContents, TableOfContentsItem, TocBuilder};

/// Heading of the hand-written contents list many documents carry. The
/// generated navigation replaces it.
pub const TOC_HEADING: &str = "Table of Contents";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationPage {
    /// Rendered HTML.
    pub content: String,
    pub sections: Vec<DocumentationSection>,
    pub metadata: Metadata,
    #[serde(default)]
    pub toc: TableOfContents,
}

/// Runs the full pipeline over one markdown document.
#[tracing::instrument(skip(markdown))]
pub fn process_markdown(markdown: &str) -> DocumentationPage {
    let EmbeddedMetadata { order } = extract_metadata(markdown);
    let metadata = Metadata {
        title: extract_title(markdown),
        description: extract_description(markdown),
        order,
    };

    let RenderedMarkdown { html, toc } = render_markdown(markdown);

    DocumentationPage {
        content: html,
        sections: extract_sections(markdown),
        metadata,
        toc,
    }
}
