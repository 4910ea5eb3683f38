use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Operating system family of the running machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Linux,
    Windows,
    MacOs,
}

impl OsFamily {
    /// Map a `std::env::consts::OS` value to a family.
    ///
    /// Platforms outside the three supported families are treated as Linux so
    /// that they land on the `other` distro and its apt default.
    pub fn from_target_os(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            _ => Self::Linux,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Windows => "windows",
            Self::MacOs => "macos",
        }
    }
}

/// Linux distribution family, as far as package management is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistroFamily {
    /// Fedora, RHEL, CentOS and rebuilds
    RedHat,
    Debian,
    /// Ubuntu and its derivatives (Pop!_OS, Mint, ...)
    Ubuntu,
    /// openSUSE and SLES
    Suse,
    /// Arch Linux and its derivatives
    Arch,
    /// Anything that could not be classified
    Other,
}

impl DistroFamily {
    /// Parse os-release content and classify the distribution.
    ///
    /// `ID` is checked first, then `ID_LIKE`. Never fails: unknown content is
    /// `Other`.
    pub fn from_os_release(content: &str) -> Self {
        let mut id = String::new();
        let mut id_like = String::new();

        for line in content.lines() {
            let line = line.trim();
            if let Some(val) = line.strip_prefix("ID=") {
                id = val.trim_matches('"').trim_matches('\'').to_lowercase();
            } else if let Some(val) = line.strip_prefix("ID_LIKE=") {
                id_like = val.trim_matches('"').trim_matches('\'').to_lowercase();
            }
        }

        match id.as_str() {
            "ubuntu" | "pop" | "linuxmint" | "elementary" | "zorin" => Self::Ubuntu,
            "debian" | "raspbian" | "kali" => Self::Debian,
            "fedora" | "rhel" | "centos" | "rocky" | "almalinux" | "ol" | "amzn" => Self::RedHat,
            "opensuse" | "opensuse-leap" | "opensuse-tumbleweed" | "sles" | "sled" => Self::Suse,
            "arch" | "manjaro" | "endeavouros" | "instantos" | "garuda" | "artix" => Self::Arch,
            _ => {
                let like: Vec<&str> = id_like.split_whitespace().collect();
                let has = |name: &str| like.iter().any(|l| l.contains(name));
                if has("arch") {
                    Self::Arch
                } else if has("ubuntu") {
                    Self::Ubuntu
                } else if has("debian") {
                    Self::Debian
                } else if has("rhel") || has("fedora") || has("centos") {
                    Self::RedHat
                } else if has("suse") {
                    Self::Suse
                } else {
                    Self::Other
                }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::RedHat => "redhat",
            Self::Debian => "debian",
            Self::Ubuntu => "ubuntu",
            Self::Suse => "suse",
            Self::Arch => "arch",
            Self::Other => "other",
        }
    }
}

/// Source of distribution-identifying text (the os-release file).
pub trait ReleaseSource {
    /// Returns the os-release content, or `None` when it cannot be read.
    fn os_release(&self) -> Option<String>;
}

/// Reads os-release from the filesystem.
#[derive(Debug, Clone)]
pub struct OsReleaseFile {
    path: PathBuf,
}

impl OsReleaseFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for OsReleaseFile {
    fn default() -> Self {
        Self::new("/etc/os-release")
    }
}

impl ReleaseSource for OsReleaseFile {
    fn os_release(&self) -> Option<String> {
        let path: &Path = &self.path;
        fs::read_to_string(path).ok()
    }
}

/// The (OS family, distro family) pair describing the current machine.
///
/// `distro` is populated only on Linux.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HostProfile {
    pub os: OsFamily,
    pub distro: Option<DistroFamily>,
}

impl HostProfile {
    pub fn new(os: OsFamily, distro: Option<DistroFamily>) -> Self {
        Self { os, distro }
    }

    pub fn linux(distro: DistroFamily) -> Self {
        Self::new(OsFamily::Linux, Some(distro))
    }

    pub fn windows() -> Self {
        Self::new(OsFamily::Windows, None)
    }

    pub fn macos() -> Self {
        Self::new(OsFamily::MacOs, None)
    }

    /// Detect the running machine.
    ///
    /// Reads the filesystem on Linux; call once per process and pass the
    /// profile around.
    pub fn detect() -> Self {
        Self::detect_with(std::env::consts::OS, &OsReleaseFile::default())
    }

    /// Detect using an explicit target OS name and release source.
    pub fn detect_with(target_os: &str, source: &dyn ReleaseSource) -> Self {
        match OsFamily::from_target_os(target_os) {
            OsFamily::Linux => Self::linux(
                source
                    .os_release()
                    .map(|content| DistroFamily::from_os_release(&content))
                    .unwrap_or(DistroFamily::Other),
            ),
            OsFamily::Windows => Self::windows(),
            OsFamily::MacOs => Self::macos(),
        }
    }
}

impl std::fmt::Display for HostProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.distro {
            Some(distro) => write!(f, "{}/{}", self.os.name(), distro.name()),
            None => write!(f, "{}", self.os.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRelease(Option<&'static str>);

    impl ReleaseSource for FixedRelease {
        fn os_release(&self) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    #[test]
    fn test_parse_arch() {
        let content = r#"NAME="Arch Linux"
PRETTY_NAME="Arch Linux"
ID=arch
BUILD_ID=rolling
ANSI_COLOR="38;2;23;147;209"
HOME_URL="https://archlinux.org/""#;
        assert_eq!(DistroFamily::from_os_release(content), DistroFamily::Arch);
    }

    #[test]
    fn test_parse_ubuntu() {
        let content = r#"PRETTY_NAME="Ubuntu 22.04.3 LTS"
NAME="Ubuntu"
VERSION_ID="22.04"
ID=ubuntu
ID_LIKE=debian
UBUNTU_CODENAME=jammy"#;
        assert_eq!(DistroFamily::from_os_release(content), DistroFamily::Ubuntu);
    }

    #[test]
    fn test_parse_rocky_is_redhat() {
        let content = r#"NAME="Rocky Linux"
ID="rocky"
ID_LIKE="rhel centos fedora""#;
        assert_eq!(DistroFamily::from_os_release(content), DistroFamily::RedHat);
    }

    #[test]
    fn test_parse_tumbleweed_is_suse() {
        let content = r#"NAME="openSUSE Tumbleweed"
ID="opensuse-tumbleweed"
ID_LIKE="opensuse suse""#;
        assert_eq!(DistroFamily::from_os_release(content), DistroFamily::Suse);
    }

    #[test]
    fn test_unknown_id_falls_back_to_id_like() {
        let content = r#"ID="customarch"
ID_LIKE="arch""#;
        assert_eq!(DistroFamily::from_os_release(content), DistroFamily::Arch);

        let content = r#"ID=neon
ID_LIKE="ubuntu debian""#;
        assert_eq!(DistroFamily::from_os_release(content), DistroFamily::Ubuntu);
    }

    #[test]
    fn test_unknown_distro_is_other() {
        assert_eq!(DistroFamily::from_os_release("ID=nixos"), DistroFamily::Other);
        assert_eq!(DistroFamily::from_os_release(""), DistroFamily::Other);
    }

    #[test]
    fn test_detect_with_injected_release() {
        let host = HostProfile::detect_with("linux", &FixedRelease(Some("ID=debian")));
        assert_eq!(host, HostProfile::linux(DistroFamily::Debian));
    }

    #[test]
    fn test_detect_without_release_file_is_other() {
        let host = HostProfile::detect_with("linux", &FixedRelease(None));
        assert_eq!(host, HostProfile::linux(DistroFamily::Other));
    }

    #[test]
    fn test_detect_non_linux_ignores_release() {
        let source = FixedRelease(Some("ID=arch"));
        assert_eq!(HostProfile::detect_with("macos", &source), HostProfile::macos());
        assert_eq!(
            HostProfile::detect_with("windows", &source),
            HostProfile::windows()
        );
    }

    #[test]
    fn test_unsupported_platform_maps_to_linux_other() {
        let host = HostProfile::detect_with("freebsd", &FixedRelease(None));
        assert_eq!(host, HostProfile::linux(DistroFamily::Other));
    }

    #[test]
    fn test_missing_file_reads_none() {
        let source = OsReleaseFile::new("/nonexistent/sai/os-release");
        assert!(source.os_release().is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(HostProfile::linux(DistroFamily::Suse).to_string(), "linux/suse");
        assert_eq!(HostProfile::windows().to_string(), "windows");
    }
}
