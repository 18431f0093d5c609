use anyhow::{Context, Result};
use std::fmt::Write as _;

use crate::{
    application::{DocsService, DocumentationPageInfo},
    docs::TableOfContentsItem,
    provider::ContentSource,
    runtime::Runtime,
};

use super::config::Config;

/// Print the documentation navigation.
#[tracing::instrument(skip(config))]
pub async fn docs_list<R: Runtime, S: ContentSource>(config: &Config<R, S>, json: bool) -> Result<()> {
    let service = DocsService::new(&config.cache, &config.source);
    let pages = service.pages_with_sections().await;

    if json {
        let out = serde_json::to_string_pretty(&pages).context("Failed to serialize page list")?;
        println!("{}", out);
    } else if pages.is_empty() {
        println!("No documentation pages available.");
    } else {
        print!("{}", format_page_list(&pages));
    }
    Ok(())
}

/// Print one documentation page: its HTML, its JSON or its table of contents.
#[tracing::instrument(skip(config))]
pub async fn docs_show<R: Runtime, S: ContentSource>(
    config: &Config<R, S>,
    slug: &str,
    json: bool,
    toc: bool,
) -> Result<()> {
    let service = DocsService::new(&config.cache, &config.source);
    let page = service.page_by_slug(slug).await?;

    if json {
        let out = serde_json::to_string_pretty(&page).context("Failed to serialize page")?;
        println!("{}", out);
    } else if toc {
        print!("{}", format_toc(&page.toc.items));
    } else {
        println!("{}", page.content);
    }
    Ok(())
}

pub fn format_page_list(pages: &[DocumentationPageInfo]) -> String {
    let mut out = String::new();
    for page in pages {
        let _ = writeln!(out, "{} ({})", page.title, page.slug);
        for section in &page.sections {
            let indent = "  ".repeat(section.level.saturating_sub(1) as usize);
            let _ = writeln!(out, "{}- {} (#{})", indent, section.title, section.slug);
        }
    }
    out
}

pub fn format_toc(items: &[TableOfContentsItem]) -> String {
    let mut out = String::new();
    write_toc(&mut out, items, 0);
    out
}

fn write_toc(out: &mut String, items: &[TableOfContentsItem], depth: usize) {
    for item in items {
        let _ = writeln!(out, "{}- {} ({})", "  ".repeat(depth), item.title, item.url);
        write_toc(out, &item.items, depth + 1);
    }
}
