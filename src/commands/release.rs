use anyhow::{Context, Result};
use log::debug;
use std::fmt::Write as _;

use crate::{
    application::ReleaseService,
    provider::ContentSource,
    release::{
        Architecture, InstallerType, ParsedRelease, Platform, Quality, RELEASES_PAGE_URL,
        download_url, release_tag_url,
    },
    runtime::Runtime,
};

use super::config::Config;

/// Print the latest release of a channel.
#[tracing::instrument(skip(config))]
pub async fn release<R: Runtime, S: ContentSource>(
    config: &Config<R, S>,
    quality: &str,
    json: bool,
) -> Result<()> {
    let quality = quality.parse::<Quality>()?;
    let service = ReleaseService::new(&config.cache, &config.source, config.dev);
    let release = service.latest_release(quality).await;

    if json {
        let out = serde_json::to_string_pretty(&release).context("Failed to serialize release")?;
        println!("{}", out);
    } else {
        print!("{}", format_release(&release, quality));
    }
    Ok(())
}

/// Print the download URL of one file, or the releases page when the
/// combination has no file.
#[tracing::instrument(skip(config))]
pub async fn download<R: Runtime, S: ContentSource>(
    config: &Config<R, S>,
    quality: &str,
    platform: &str,
    arch: &str,
    installer: Option<&str>,
) -> Result<()> {
    let quality = quality.parse::<Quality>()?;
    let platform = platform.parse::<Platform>()?;
    let arch = arch.parse::<Architecture>()?;
    let installer = match installer {
        Some(name) => name.parse::<InstallerType>()?,
        None => platform.default_installer(arch),
    };
    debug!("Resolving {} {} {} ({})", platform, arch, installer, quality);

    let service = ReleaseService::new(&config.cache, &config.source, config.dev);
    let release = service.latest_release(quality).await;

    println!("{}", download_url(&release, platform, arch, installer));
    Ok(())
}

/// Human readable release summary: every platform and architecture with the
/// files published for it.
pub fn format_release(release: &ParsedRelease, quality: Quality) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "VSCodium {} ({})", release.version, quality);
    let _ = writeln!(out, "Published: {}", release.published_at);
    let _ = writeln!(out, "Release notes: {}", release_tag_url(&release.version));

    if release.is_empty() {
        let _ = writeln!(out, "\nNo downloads available. See {}", RELEASES_PAGE_URL);
        return out;
    }

    for platform in Platform::ALL {
        for arch in release.available_architectures(platform) {
            let _ = writeln!(out, "\n{} {}", platform, arch);
            for installer in release.available_installer_types(platform, arch) {
                let marker = if installer == platform.default_installer(arch) {
                    "*"
                } else {
                    " "
                };
                let _ = writeln!(
                    out,
                    "  {} {:<24} {}",
                    marker,
                    installer.label(platform),
                    download_url(release, platform, arch, installer)
                );
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::{ReleaseAsset, ReleaseRecord, parse_release};

    #[test]
    fn test_format_release() {
        let record = ReleaseRecord {
            tag_name: "1.99.32846".into(),
            published_at: Some("2025-04-10T12:00:00Z".into()),
            assets: vec![
                ReleaseAsset::new(
                    "codium_1.99.32846_amd64.deb",
                    "https://example.com/codium_1.99.32846_amd64.deb",
                ),
                ReleaseAsset::new(
                    "VSCodium-linux-x64-1.99.32846.tar.gz",
                    "https://example.com/VSCodium-linux-x64-1.99.32846.tar.gz",
                ),
            ],
            ..Default::default()
        };
        let release = parse_release(&record);
        let text = format_release(&release, Quality::Stable);

        assert!(text.starts_with("VSCodium 1.99.32846 (stable)\n"));
        assert!(text.contains("Published: 2025-04-10T12:00:00Z"));
        assert!(text.contains(
            "Release notes: https://github.com/VSCodium/vscodium/releases/tag/1.99.32846"
        ));
        assert!(text.contains("\nlinux x64\n"));
        assert!(text.contains("* Debian/Ubuntu (.deb)"));
        assert!(text.contains("https://example.com/VSCodium-linux-x64-1.99.32846.tar.gz"));
        assert!(!text.contains("windows"));
    }

    #[test]
    fn test_format_fallback_release() {
        let text = format_release(&ParsedRelease::fallback(), Quality::Insider);
        assert!(text.starts_with("VSCodium 1.99.32846 (insider)\n"));
        assert!(text.contains("No downloads available"));
        assert!(text.contains(RELEASES_PAGE_URL));
    }
}
