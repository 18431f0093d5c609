//! Application layer - Use cases that coordinate the content source, the
//! on-disk cache and the pure release/documentation transformations.
//!
//! Upstream failures stop here: callers always get a release (possibly the
//! fallback one) and a documentation page (possibly the unavailable one).

mod docs;
mod release;

pub use docs::{
    DEFAULT_ORDER, DocsError, DocsService, DocumentationPageInfo, UNAVAILABLE_TITLE,
    compare_pages, file_for_slug, rewrite_doc_links, slug_for_file, unavailable_page,
};
pub use release::ReleaseService;
