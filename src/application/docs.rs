//! Documentation service - fetches, caches and renders documentation pages
//! and builds the ordered navigation listing.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

use anyhow::Result;
use futures_util::future::join_all;
use log::{debug, error, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::SiteCache;
use crate::docs::{DocumentationPage, DocumentationSection, Metadata, process_markdown};
use crate::http::is_rate_limited;
use crate::provider::ContentSource;
use crate::runtime::Runtime;

/// Sort position of pages that do not declare an `order`.
pub const DEFAULT_ORDER: i64 = 999;

pub const UNAVAILABLE_TITLE: &str = "Documentation Unavailable";

const UNAVAILABLE_DESCRIPTION: &str = "We couldn't load the documentation. Please try again later.";

const UNAVAILABLE_HTML: &str = "<h1>Documentation Unavailable</h1><p>We couldn't load the documentation. Please try again later or check the <a href=\"https://github.com/VSCodium/vscodium/tree/master/docs\">GitHub repository</a>.</p>";

static DOC_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://github\.com/VSCodium/vscodium/blob/master/docs/([\w-]+)\.md")
        .expect("valid regex")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocsError {
    #[error("Documentation page '{slug}' not found")]
    NotFound { slug: String },
}

/// One entry of the documentation navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationPageInfo {
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order: i64,
    pub sections: Vec<DocumentationSection>,
}

/// Points links to upstream documentation files at the local docs routes.
pub fn rewrite_doc_links(markdown: &str) -> Cow<'_, str> {
    DOC_LINK_RE.replace_all(markdown, "/docs/$1")
}

/// Page shown in place of a document that could not be fetched.
pub fn unavailable_page() -> DocumentationPage {
    DocumentationPage {
        content: UNAVAILABLE_HTML.to_string(),
        sections: Vec::new(),
        metadata: Metadata {
            title: UNAVAILABLE_TITLE.to_string(),
            description: Some(UNAVAILABLE_DESCRIPTION.to_string()),
            order: None,
        },
        toc: Default::default(),
    }
}

pub fn slug_for_file(file_name: &str) -> &str {
    file_name.strip_suffix(".md").unwrap_or(file_name)
}

pub fn file_for_slug(slug: &str) -> String {
    format!("{}.md", slug)
}

/// Slugs are single path segments; anything else cannot name a document.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Navigation order: `index` first, then by `order`, then by title.
pub fn compare_pages(a: &DocumentationPageInfo, b: &DocumentationPageInfo) -> Ordering {
    match (a.slug == "index", b.slug == "index") {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    a.order
        .cmp(&b.order)
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        .then_with(|| a.title.cmp(&b.title))
}

pub struct DocsService<'a, R: Runtime, S: ContentSource> {
    cache: &'a SiteCache<R>,
    source: &'a S,
    pages: Mutex<HashMap<String, DocumentationPage>>,
}

impl<'a, R: Runtime, S: ContentSource> DocsService<'a, R, S> {
    pub fn new(cache: &'a SiteCache<R>, source: &'a S) -> Self {
        Self {
            cache,
            source,
            pages: Mutex::new(HashMap::new()),
        }
    }

    /// Names of the known documentation files. Empty when neither the cache
    /// nor the upstream listing is available.
    #[tracing::instrument(skip(self))]
    pub async fn list_pages(&self) -> Vec<String> {
        match self.cache.read_pages() {
            Ok(Some(pages)) => return pages,
            Ok(None) => {}
            Err(e) => warn!("Ignoring unreadable page listing cache: {:#}", e),
        }

        match self.source.list_docs().await {
            Ok(pages) => {
                if let Err(e) = self.cache.write_pages(&pages) {
                    warn!("Failed to cache page listing: {:#}", e);
                }
                pages
            }
            Err(e) => {
                error!("Error fetching doc pages: {:#}", e);
                Vec::new()
            }
        }
    }

    /// Rendered page for one documentation file, or the unavailable page
    /// when its source cannot be obtained.
    #[tracing::instrument(skip(self))]
    pub async fn page(&self, file_name: &str) -> DocumentationPage {
        let memoised = self.pages.lock().unwrap().get(file_name).cloned();
        if let Some(page) = memoised {
            debug!("Using memoised page {}", file_name);
            return page;
        }

        let markdown = match self.load_markdown(file_name).await {
            Ok(markdown) => markdown,
            Err(e) => {
                if is_rate_limited(&e) {
                    warn!("{:#}", e);
                }
                error!("Error fetching doc page {}: {:#}", file_name, e);
                return unavailable_page();
            }
        };

        let page = process_markdown(&rewrite_doc_links(&markdown));
        self.pages
            .lock()
            .unwrap()
            .insert(file_name.to_string(), page.clone());
        page
    }

    /// Page addressed by its route slug.
    #[tracing::instrument(skip(self))]
    pub async fn page_by_slug(&self, slug: &str) -> Result<DocumentationPage, DocsError> {
        if !is_valid_slug(slug) {
            return Err(DocsError::NotFound {
                slug: slug.to_string(),
            });
        }

        let file_name = file_for_slug(slug);
        let pages = self.list_pages().await;
        if !pages.is_empty() && !pages.contains(&file_name) {
            return Err(DocsError::NotFound {
                slug: slug.to_string(),
            });
        }

        Ok(self.page(&file_name).await)
    }

    /// Every listed page with its sections, in navigation order. Pages
    /// declaring `order: 0` are hidden.
    #[tracing::instrument(skip(self))]
    pub async fn pages_with_sections(&self) -> Vec<DocumentationPageInfo> {
        let files = self.list_pages().await;

        let loaded = join_all(files.iter().map(|file| async move {
            let page = self.page(file).await;
            (file, page)
        }))
        .await;

        let mut infos: Vec<DocumentationPageInfo> = loaded
            .into_iter()
            .filter_map(|(file, page)| {
                if page.metadata.order == Some(0) {
                    debug!("Hiding page {} (order 0)", file);
                    return None;
                }
                Some(DocumentationPageInfo {
                    slug: slug_for_file(file).to_string(),
                    order: page.metadata.order.unwrap_or(DEFAULT_ORDER),
                    title: page.metadata.title,
                    description: page.metadata.description,
                    sections: page.sections,
                })
            })
            .collect();

        infos.sort_by(compare_pages);
        infos
    }

    async fn load_markdown(&self, file_name: &str) -> Result<String> {
        match self.cache.read_doc(file_name) {
            Ok(Some(markdown)) => return Ok(markdown),
            Ok(None) => {}
            Err(e) => warn!("Ignoring unreadable cached page {}: {:#}", file_name, e),
        }

        let markdown = self.source.fetch_doc(file_name).await?;
        if let Err(e) = self.cache.write_doc(file_name, &markdown) {
            warn!("Failed to cache page {}: {:#}", file_name, e);
        }
        Ok(markdown)
    }
}
