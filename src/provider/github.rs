//! GitHub content source.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;

use crate::http::{HttpClient, RAW_MEDIA_TYPE};
use crate::release::{Quality, ReleaseRecord};

use super::{ContentSource, RepoId};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub API response types (internal).
mod api {
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    pub struct ContentEntry {
        pub name: String,
    }
}

pub struct GitHubSource {
    http_client: HttpClient,
    api_url: String,
}

impl GitHubSource {
    pub fn new(http_client: HttpClient, api_url: Option<String>) -> Self {
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn docs_url(&self) -> String {
        let repo = RepoId::docs();
        format!("{}/repos/{}/{}/contents/docs", self.api_url, repo.owner, repo.repo)
    }
}

#[async_trait]
impl ContentSource for GitHubSource {
    #[tracing::instrument(skip(self))]
    async fn latest_release(&self, quality: Quality) -> Result<ReleaseRecord> {
        let repo = RepoId::for_quality(quality);
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url, repo.owner, repo.repo
        );
        debug!("Fetching data from GitHub API: {}", url);

        self.http_client
            .get_json(&url)
            .await
            .with_context(|| format!("Failed to fetch the latest {} release", quality))
    }

    #[tracing::instrument(skip(self))]
    async fn list_docs(&self) -> Result<Vec<String>> {
        let url = self.docs_url();
        debug!("Fetching documentation listing from {}...", url);

        let entries: Vec<api::ContentEntry> = self
            .http_client
            .get_json(&url)
            .await
            .context("Failed to list documentation files")?;

        Ok(entries
            .into_iter()
            .map(|entry| entry.name)
            .filter(|name| name.ends_with(".md"))
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_doc(&self, file_name: &str) -> Result<String> {
        let url = format!("{}/{}", self.docs_url(), file_name);
        debug!("Fetching documentation page from {}...", url);

        self.http_client
            .get_text(&url, RAW_MEDIA_TYPE)
            .await
            .with_context(|| format!("Failed to fetch documentation page {}", file_name))
    }
}
