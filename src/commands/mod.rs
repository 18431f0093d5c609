//! Command implementations behind the CLI.

pub mod config;
mod docs;
mod export;
mod paths;
mod release;

pub use config::{Config, SiteOptions, USER_AGENT};
pub use docs::{docs_list, docs_show, format_page_list, format_toc};
pub use export::export;
pub use paths::{CACHE_DIR_NAME, default_cache_dir, resolve_cache_dir};
pub use release::{download, format_release, release};
