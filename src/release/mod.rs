//! Release matrix for the published editor builds.
//!
//! A provider release is a flat list of downloadable files. This module turns
//! it into a fixed-shape table indexed by platform, architecture and installer
//! type, and answers lookups against that table.

mod lookup;
mod parse;
mod record;
mod types;

pub use lookup::{LookupError, RELEASES_PAGE_URL, download_file_name, download_url, release_tag_url};
pub use parse::{classify_asset, detect_architecture, extract_version, parse_release};
pub use record::{ReleaseAsset, ReleaseRecord};
pub use types::{
    Architecture, Installers, InstallerType, LinuxBuilds, MacosBuilds, ParsedRelease, Platform,
    Platforms, Quality, WindowsBuilds,
};

/// Version reported when no release data could be obtained.
pub const FALLBACK_VERSION: &str = "1.99.32846";
