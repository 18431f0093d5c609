//! Remote content sources.
//!
//! Release records and documentation sources both live on the code hosting
//! platform. The [`ContentSource`] trait hides the API so the caching layer
//! can be tested without a network.

mod github;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;

use crate::release::{Quality, ReleaseRecord};

pub use github::{DEFAULT_API_URL, GitHubSource};

/// Organisation publishing the editor builds and documentation.
pub const UPSTREAM_OWNER: &str = "VSCodium";

/// Repository whose `docs/` directory holds the documentation sources.
pub const DOCS_REPO: &str = "vscodium";

/// Repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Repository publishing releases for a channel.
    pub fn for_quality(quality: Quality) -> Self {
        Self::new(UPSTREAM_OWNER, quality.repo_name())
    }

    /// Repository holding the documentation sources.
    pub fn docs() -> Self {
        Self::new(UPSTREAM_OWNER, DOCS_REPO)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Where release records and documentation sources are fetched from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the latest release record of a channel.
    async fn latest_release(&self, quality: Quality) -> Result<ReleaseRecord>;

    /// Fetch the names of the markdown files in the documentation directory.
    async fn list_docs(&self) -> Result<Vec<String>>;

    /// Fetch the raw markdown of one documentation file.
    async fn fetch_doc(&self, file_name: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_for_quality() {
        assert_eq!(
            RepoId::for_quality(Quality::Stable).to_string(),
            "VSCodium/vscodium"
        );
        assert_eq!(
            RepoId::for_quality(Quality::Insider).to_string(),
            "VSCodium/vscodium-insiders"
        );
        assert_eq!(RepoId::docs().to_string(), "VSCodium/vscodium");
    }
}
