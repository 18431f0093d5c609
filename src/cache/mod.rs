//! On-disk cache of fetched remote content.
//!
//! Layout under the cache root:
//!
//! - `release-data.<quality>.json` - last fetched raw release record
//! - `pages.json` - names of the known documentation files
//! - `<name>.md` - raw markdown of one documentation file
//!
//! Everything is plain JSON or UTF-8 text and may be deleted at any time;
//! a missing file is a cache miss.

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::release::{Quality, ReleaseRecord};
use crate::runtime::Runtime;

pub const PAGES_FILE: &str = "pages.json";

pub struct SiteCache<R: Runtime> {
    runtime: R,
    root: PathBuf,
}

impl<R: Runtime> SiteCache<R> {
    pub fn new(runtime: R, root: PathBuf) -> Self {
        Self { runtime, root }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn release_path(&self, quality: Quality) -> PathBuf {
        self.root.join(format!("release-data.{}.json", quality))
    }

    pub fn pages_path(&self) -> PathBuf {
        self.root.join(PAGES_FILE)
    }

    pub fn doc_path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    #[tracing::instrument(skip(self))]
    pub fn read_release(&self, quality: Quality) -> Result<Option<ReleaseRecord>> {
        self.read_json(&self.release_path(quality))
    }

    #[tracing::instrument(skip(self, record))]
    pub fn write_release(&self, record: &ReleaseRecord, quality: Quality) -> Result<()> {
        self.write_json(&self.release_path(quality), record)
    }

    #[tracing::instrument(skip(self))]
    pub fn read_pages(&self) -> Result<Option<Vec<String>>> {
        self.read_json(&self.pages_path())
    }

    #[tracing::instrument(skip(self, pages))]
    pub fn write_pages(&self, pages: &[String]) -> Result<()> {
        self.write_json(&self.pages_path(), &pages)
    }

    #[tracing::instrument(skip(self))]
    pub fn read_doc(&self, file_name: &str) -> Result<Option<String>> {
        let path = self.doc_path(file_name);
        if !self.runtime.exists(&path) {
            return Ok(None);
        }
        debug!("Cache hit: {:?}", path);
        self.runtime.read_to_string(&path).map(Some)
    }

    #[tracing::instrument(skip(self, content))]
    pub fn write_doc(&self, file_name: &str, content: &str) -> Result<()> {
        self.write_file(&self.doc_path(file_name), content.as_bytes())
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        if !self.runtime.exists(path) {
            return Ok(None);
        }
        debug!("Cache hit: {:?}", path);
        let content = self.runtime.read_to_string(path)?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse cached JSON at {:?}", path))?;
        Ok(Some(value))
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.write_file(path, json.as_bytes())
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            self.runtime.create_dir_all(parent)?;
        }
        debug!("Writing cache file {:?}", path);
        self.runtime.write(path, contents)
    }
}
