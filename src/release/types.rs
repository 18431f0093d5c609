use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::FALLBACK_VERSION;

/// Release channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Stable,
    Insider,
}

impl Quality {
    pub const ALL: [Quality; 2] = [Quality::Stable, Quality::Insider];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Stable => "stable",
            Quality::Insider => "insider",
        }
    }

    /// Name of the upstream repository publishing this channel.
    pub fn repo_name(&self) -> &'static str {
        match self {
            Quality::Stable => "vscodium",
            Quality::Insider => "vscodium-insiders",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stable" => Ok(Quality::Stable),
            "insider" | "insiders" => Ok(Quality::Insider),
            _ => anyhow::bail!("Unknown quality: {}. Expected stable or insider.", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Macos,
    Linux,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::Macos, Platform::Linux];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Macos => "macos",
            Platform::Linux => "linux",
        }
    }

    /// Architectures built for this platform, in display order.
    pub fn architectures(&self) -> &'static [Architecture] {
        use Architecture::*;
        match self {
            Platform::Windows | Platform::Macos => &[X64, Arm64],
            Platform::Linux => &[X64, Arm64, Arm32, Ppc64, Riscv64, Loong64, S390x],
        }
    }

    /// Installer preselected for an architecture before the user picks one.
    pub fn default_installer(&self, arch: Architecture) -> InstallerType {
        match self {
            Platform::Windows => InstallerType::UserInstaller,
            Platform::Macos => InstallerType::Dmg,
            Platform::Linux => match arch {
                // No distribution packages are published for these.
                Architecture::Ppc64 | Architecture::Riscv64 | Architecture::Loong64 => {
                    InstallerType::TarGz
                }
                _ => InstallerType::Deb,
            },
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" => Ok(Platform::Windows),
            "macos" => Ok(Platform::Macos),
            "linux" => Ok(Platform::Linux),
            _ => anyhow::bail!(
                "Unknown platform: {}. Expected windows, macos, or linux.",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    X64,
    Arm64,
    Arm32,
    Ppc64,
    Riscv64,
    Loong64,
    S390x,
}

impl Architecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X64 => "x64",
            Architecture::Arm64 => "arm64",
            Architecture::Arm32 => "arm32",
            Architecture::Ppc64 => "ppc64",
            Architecture::Riscv64 => "riscv64",
            Architecture::Loong64 => "loong64",
            Architecture::S390x => "s390x",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x64" => Ok(Architecture::X64),
            "arm64" => Ok(Architecture::Arm64),
            "arm32" => Ok(Architecture::Arm32),
            "ppc64" => Ok(Architecture::Ppc64),
            "riscv64" => Ok(Architecture::Riscv64),
            "loong64" => Ok(Architecture::Loong64),
            "s390x" => Ok(Architecture::S390x),
            _ => anyhow::bail!("Unknown architecture: {}", s),
        }
    }
}

/// Packaging format of a downloadable file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InstallerType {
    UserInstaller,
    SystemInstaller,
    #[serde(rename = "msi")]
    Msi,
    #[serde(rename = "dmg")]
    Dmg,
    #[serde(rename = "deb")]
    Deb,
    #[serde(rename = "rpm")]
    Rpm,
    #[serde(rename = "tar.gz")]
    TarGz,
    AppImage,
    #[serde(rename = "zip")]
    Zip,
    #[serde(rename = "cli")]
    Cli,
}

impl InstallerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallerType::UserInstaller => "UserInstaller",
            InstallerType::SystemInstaller => "SystemInstaller",
            InstallerType::Msi => "msi",
            InstallerType::Dmg => "dmg",
            InstallerType::Deb => "deb",
            InstallerType::Rpm => "rpm",
            InstallerType::TarGz => "tar.gz",
            InstallerType::AppImage => "AppImage",
            InstallerType::Zip => "zip",
            InstallerType::Cli => "cli",
        }
    }

    /// Human readable label used on install buttons.
    pub fn label(&self, platform: Platform) -> &'static str {
        match (self, platform) {
            (InstallerType::UserInstaller, _) => "User Installer (.exe)",
            (InstallerType::SystemInstaller, _) => "System Installer (.exe)",
            (InstallerType::Msi, _) => "Windows Installer (.msi)",
            (InstallerType::Dmg, _) => "Disk Image (.dmg)",
            (InstallerType::Deb, _) => "Debian/Ubuntu (.deb)",
            (InstallerType::Rpm, _) => "Red Hat/Fedora (.rpm)",
            (InstallerType::TarGz, _) => "Archive (.tar.gz)",
            (InstallerType::AppImage, _) => "AppImage",
            (InstallerType::Zip, Platform::Macos) => "Archive (.zip)",
            (InstallerType::Zip, _) => "Portable (.zip)",
            (InstallerType::Cli, _) => "CLI",
        }
    }
}

impl fmt::Display for InstallerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstallerType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UserInstaller" => Ok(InstallerType::UserInstaller),
            "SystemInstaller" => Ok(InstallerType::SystemInstaller),
            "msi" => Ok(InstallerType::Msi),
            "dmg" => Ok(InstallerType::Dmg),
            "deb" => Ok(InstallerType::Deb),
            "rpm" => Ok(InstallerType::Rpm),
            "tar.gz" => Ok(InstallerType::TarGz),
            "AppImage" => Ok(InstallerType::AppImage),
            "zip" => Ok(InstallerType::Zip),
            "cli" => Ok(InstallerType::Cli),
            _ => anyhow::bail!("Unknown installer type: {}", s),
        }
    }
}

/// Download URLs of one platform/architecture slot, keyed by installer type.
pub type Installers = BTreeMap<InstallerType, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowsBuilds {
    pub x64: Installers,
    pub arm64: Installers,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacosBuilds {
    pub x64: Installers,
    pub arm64: Installers,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinuxBuilds {
    pub x64: Installers,
    pub arm64: Installers,
    pub arm32: Installers,
    pub ppc64: Installers,
    pub riscv64: Installers,
    pub loong64: Installers,
    pub s390x: Installers,
}

/// One slot per supported platform/architecture pair. Slots that do not
/// exist for a platform (e.g. macOS on ppc64) are unrepresentable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platforms {
    pub windows: WindowsBuilds,
    pub macos: MacosBuilds,
    pub linux: LinuxBuilds,
}

impl Platforms {
    pub fn slot(&self, platform: Platform, arch: Architecture) -> Option<&Installers> {
        use Architecture::*;
        match (platform, arch) {
            (Platform::Windows, X64) => Some(&self.windows.x64),
            (Platform::Windows, Arm64) => Some(&self.windows.arm64),
            (Platform::Macos, X64) => Some(&self.macos.x64),
            (Platform::Macos, Arm64) => Some(&self.macos.arm64),
            (Platform::Linux, X64) => Some(&self.linux.x64),
            (Platform::Linux, Arm64) => Some(&self.linux.arm64),
            (Platform::Linux, Arm32) => Some(&self.linux.arm32),
            (Platform::Linux, Ppc64) => Some(&self.linux.ppc64),
            (Platform::Linux, Riscv64) => Some(&self.linux.riscv64),
            (Platform::Linux, Loong64) => Some(&self.linux.loong64),
            (Platform::Linux, S390x) => Some(&self.linux.s390x),
            _ => None,
        }
    }

    pub fn slot_mut(&mut self, platform: Platform, arch: Architecture) -> Option<&mut Installers> {
        use Architecture::*;
        match (platform, arch) {
            (Platform::Windows, X64) => Some(&mut self.windows.x64),
            (Platform::Windows, Arm64) => Some(&mut self.windows.arm64),
            (Platform::Macos, X64) => Some(&mut self.macos.x64),
            (Platform::Macos, Arm64) => Some(&mut self.macos.arm64),
            (Platform::Linux, X64) => Some(&mut self.linux.x64),
            (Platform::Linux, Arm64) => Some(&mut self.linux.arm64),
            (Platform::Linux, Arm32) => Some(&mut self.linux.arm32),
            (Platform::Linux, Ppc64) => Some(&mut self.linux.ppc64),
            (Platform::Linux, Riscv64) => Some(&mut self.linux.riscv64),
            (Platform::Linux, Loong64) => Some(&mut self.linux.loong64),
            (Platform::Linux, S390x) => Some(&mut self.linux.s390x),
            _ => None,
        }
    }
}

/// A release normalized into the platform/architecture/installer matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRelease {
    pub version: String,
    pub published_at: String,
    pub platforms: Platforms,
}

impl ParsedRelease {
    /// Release used when the provider cannot be reached: a fixed version and
    /// no downloadable files.
    pub fn fallback() -> Self {
        Self {
            version: FALLBACK_VERSION.to_string(),
            published_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            platforms: Platforms::default(),
        }
    }

    /// Architectures of `platform` with at least one published file.
    pub fn available_architectures(&self, platform: Platform) -> Vec<Architecture> {
        platform
            .architectures()
            .iter()
            .copied()
            .filter(|arch| {
                self.platforms
                    .slot(platform, *arch)
                    .is_some_and(|installers| !installers.is_empty())
            })
            .collect()
    }

    pub fn available_installer_types(
        &self,
        platform: Platform,
        arch: Architecture,
    ) -> Vec<InstallerType> {
        self.platforms
            .slot(platform, arch)
            .map(|installers| installers.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        Platform::ALL.iter().all(|platform| {
            platform.architectures().iter().all(|arch| {
                self.platforms
                    .slot(*platform, *arch)
                    .is_none_or(|installers| installers.is_empty())
            })
        })
    }
}
