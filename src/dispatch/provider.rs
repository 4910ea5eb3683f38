//! Provider classification and default-provider resolution.

use serde::Serialize;
use std::fmt;

use super::verb::ProviderCategory;
use crate::common::distro::{DistroFamily, HostProfile, OsFamily};

/// Every named provider sai knows. The set is closed; membership is looked
/// up, never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    // OS package managers
    Rpm,
    Apt,
    Brew,
    Winget,
    Pacman,
    Zypper,
    // Container orchestration
    Helm,
    Kubectl,
    // Cloud platforms
    Aws,
    Azure,
    Gcp,
}

impl Provider {
    pub const ALL: [Provider; 11] = [
        Provider::Rpm,
        Provider::Apt,
        Provider::Brew,
        Provider::Winget,
        Provider::Pacman,
        Provider::Zypper,
        Provider::Helm,
        Provider::Kubectl,
        Provider::Aws,
        Provider::Azure,
        Provider::Gcp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Rpm => "rpm",
            Provider::Apt => "apt",
            Provider::Brew => "brew",
            Provider::Winget => "winget",
            Provider::Pacman => "pacman",
            Provider::Zypper => "zypper",
            Provider::Helm => "helm",
            Provider::Kubectl => "kubectl",
            Provider::Aws => "aws",
            Provider::Azure => "azure",
            Provider::Gcp => "gcp",
        }
    }

    pub fn category(&self) -> ProviderCategory {
        match self {
            Provider::Rpm
            | Provider::Apt
            | Provider::Brew
            | Provider::Winget
            | Provider::Pacman
            | Provider::Zypper => ProviderCategory::Os,
            Provider::Helm | Provider::Kubectl => ProviderCategory::Container,
            Provider::Aws | Provider::Azure | Provider::Gcp => ProviderCategory::Cloud,
        }
    }

    /// Look a free-form provider name up in the static table.
    ///
    /// Matching is exact after trimming and lower-casing; there is no prefix
    /// or fuzzy matching.
    pub fn classify(name: &str) -> Option<Provider> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        Provider::ALL.into_iter().find(|p| p.name() == wanted)
    }

    /// Providers belonging to one category, in table order.
    pub fn in_category(category: ProviderCategory) -> impl Iterator<Item = Provider> {
        Provider::ALL
            .into_iter()
            .filter(move |p| p.category() == category)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Service managers; one per host, chosen by OS family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceManager {
    Systemd,
    BrewServices,
}

impl ServiceManager {
    pub const ALL: [ServiceManager; 2] = [ServiceManager::Systemd, ServiceManager::BrewServices];

    /// The service manager for a host. Windows has none.
    pub fn for_host(host: &HostProfile) -> Option<ServiceManager> {
        match host.os {
            OsFamily::Linux => Some(ServiceManager::Systemd),
            OsFamily::MacOs => Some(ServiceManager::BrewServices),
            OsFamily::Windows => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServiceManager::Systemd => "systemd",
            ServiceManager::BrewServices => "brew-services",
        }
    }
}

impl fmt::Display for ServiceManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Default OS package manager for a host.
///
/// Pairs missing from the table fall back to apt; that is the documented
/// universal default, not an error.
pub fn default_os_provider(host: &HostProfile) -> Provider {
    match (host.os, host.distro) {
        (OsFamily::Windows, None) => Provider::Winget,
        (OsFamily::MacOs, None) => Provider::Brew,
        (OsFamily::Linux, Some(DistroFamily::RedHat)) => Provider::Rpm,
        (OsFamily::Linux, Some(DistroFamily::Debian)) => Provider::Apt,
        (OsFamily::Linux, Some(DistroFamily::Ubuntu)) => Provider::Apt,
        (OsFamily::Linux, Some(DistroFamily::Suse)) => Provider::Zypper,
        (OsFamily::Linux, Some(DistroFamily::Arch)) => Provider::Pacman,
        (OsFamily::Linux, Some(DistroFamily::Other)) => Provider::Apt,
        _ => Provider::Apt,
    }
}
