use log::error;
use thiserror::Error;

use super::types::{Architecture, InstallerType, ParsedRelease, Platform};

/// Generic download page used when no specific artifact can be linked.
pub const RELEASES_PAGE_URL: &str = "https://github.com/VSCodium/vscodium/releases/latest";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Architecture {arch} not found for platform {platform}")]
    ArchitectureNotFound {
        platform: Platform,
        arch: Architecture,
    },
    #[error("Installer type {installer} not found for {platform} {arch}")]
    InstallerNotFound {
        platform: Platform,
        arch: Architecture,
        installer: InstallerType,
    },
}

impl ParsedRelease {
    /// URL of the artifact published for a platform/architecture/installer.
    pub fn lookup(
        &self,
        platform: Platform,
        arch: Architecture,
        installer: InstallerType,
    ) -> Result<&str, LookupError> {
        let slot = self
            .platforms
            .slot(platform, arch)
            .ok_or(LookupError::ArchitectureNotFound { platform, arch })?;

        slot.get(&installer)
            .map(String::as_str)
            .ok_or(LookupError::InstallerNotFound {
                platform,
                arch,
                installer,
            })
    }
}

/// Like [`ParsedRelease::lookup`], but never fails: missing artifacts link
/// to the generic releases page.
pub fn download_url(
    release: &ParsedRelease,
    platform: Platform,
    arch: Architecture,
    installer: InstallerType,
) -> String {
    match release.lookup(platform, arch, installer) {
        Ok(url) => url.to_string(),
        Err(e) => {
            error!("Error getting download URL: {}", e);
            RELEASES_PAGE_URL.to_string()
        }
    }
}

/// Page of one tagged release.
pub fn release_tag_url(version: &str) -> String {
    format!("https://github.com/VSCodium/vscodium/releases/tag/{}", version)
}

/// File name part of a download URL.
pub fn download_file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
