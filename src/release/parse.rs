//! Classification of release file names into the release matrix.

use log::debug;

use super::record::ReleaseRecord;
use super::types::{Architecture, InstallerType, ParsedRelease, Platform, Platforms};

/// Strips a build qualifier from a tag: `1.99.32846-insider` -> `1.99.32846`.
pub fn extract_version(tag: &str) -> &str {
    match tag.split_once('-') {
        Some((version, _)) => version,
        None => tag,
    }
}

/// Architecture hinted by a file name. First match wins, `x64` otherwise.
pub fn detect_architecture(name: &str) -> Architecture {
    if name.contains("arm64") || name.contains("aarch64") {
        Architecture::Arm64
    } else if name.contains("armhf") || name.contains("armv7") {
        Architecture::Arm32
    } else if name.contains("ppc64") {
        Architecture::Ppc64
    } else if name.contains("riscv64") {
        Architecture::Riscv64
    } else if name.contains("loong64") {
        Architecture::Loong64
    } else if name.contains("s390x") {
        Architecture::S390x
    } else {
        Architecture::X64
    }
}

/// Maps a file name to the slot it belongs in, or `None` when the file is
/// not an installable artifact (checksums, signatures, source archives...).
pub fn classify_asset(name: &str) -> Option<(Platform, Architecture, InstallerType)> {
    let arch = detect_architecture(name);

    let (platform, installer) = if name.ends_with(".AppImage") {
        (Platform::Linux, InstallerType::AppImage)
    } else if name.ends_with(".deb") {
        (Platform::Linux, InstallerType::Deb)
    } else if name.ends_with(".dmg") {
        (Platform::Macos, InstallerType::Dmg)
    } else if name.ends_with(".exe") {
        if name.contains("UserSetup") {
            (Platform::Windows, InstallerType::UserInstaller)
        } else {
            (Platform::Windows, InstallerType::SystemInstaller)
        }
    } else if name.ends_with(".msi") {
        if name.contains("disabled") {
            return None;
        }
        (Platform::Windows, InstallerType::Msi)
    } else if name.ends_with(".rpm") {
        (Platform::Linux, InstallerType::Rpm)
    } else if name.ends_with(".tar.gz") {
        if name.contains("cli") {
            let platform = if name.contains("darwin") {
                Platform::Macos
            } else if name.contains("linux") {
                Platform::Linux
            } else {
                Platform::Windows
            };
            (platform, InstallerType::Cli)
        } else if name.contains("VSCodium-linux-") {
            (Platform::Linux, InstallerType::TarGz)
        } else {
            return None;
        }
    } else if name.ends_with(".zip") {
        if name.contains("darwin") {
            (Platform::Macos, InstallerType::Zip)
        } else {
            (Platform::Windows, InstallerType::Zip)
        }
    } else {
        return None;
    };

    Some((platform, arch, installer))
}

/// Builds the release matrix from a provider record. Assets are applied in
/// list order, so a later asset overwrites an earlier one in the same slot.
#[tracing::instrument(skip(release), fields(tag = %release.tag_name))]
pub fn parse_release(release: &ReleaseRecord) -> ParsedRelease {
    let mut platforms = Platforms::default();

    for asset in &release.assets {
        let Some((platform, arch, installer)) = classify_asset(&asset.name) else {
            debug!("Skipping asset {}", asset.name);
            continue;
        };

        match platforms.slot_mut(platform, arch) {
            Some(slot) => {
                slot.insert(installer, asset.browser_download_url.clone());
            }
            None => {
                debug!(
                    "Skipping asset {}: no {} build for {}",
                    asset.name, arch, platform
                );
            }
        }
    }

    ParsedRelease {
        version: extract_version(&release.tag_name).to_string(),
        published_at: release.published_at.clone().unwrap_or_default(),
        platforms,
    }
}
