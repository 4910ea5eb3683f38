//! Optional user configuration.
//!
//! The file only supplies provider options (namespace, region, profile, ...)
//! and the managed-software list used by the `*` target. It never decides
//! which provider handles a request; that always comes from the host.
//!
//! ```toml
//! managed_software = ["nginx", "redis"]
//!
//! [kubectl]
//! namespace = "web"
//!
//! [aws]
//! region = "eu-west-1"
//! profile = "ops"
//!
//! [azure]
//! location = "westeurope"
//! subscription = "prod"
//! resource_group = "web-rg"
//!
//! [gcp]
//! zone = "europe-west1-b"
//! project = "my-project"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::common::paths;
use crate::dispatch::provider::Provider;
use crate::providers::ProviderOptions;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KubectlSection {
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AwsSection {
    pub region: Option<String>,
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AzureSection {
    pub location: Option<String>,
    pub subscription: Option<String>,
    pub resource_group: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GcpSection {
    pub zone: Option<String>,
    pub project: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SaiConfig {
    /// Names the `*` target expands to. Empty means the built-in list.
    pub managed_software: Vec<String>,
    pub kubectl: KubectlSection,
    pub aws: AwsSection,
    pub azure: AzureSection,
    pub gcp: GcpSection,
}

impl SaiConfig {
    /// Load the configuration.
    ///
    /// With an explicit path the file must exist. Without one, the default
    /// location is used and a missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = paths::default_config_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Options configured for one provider. Providers without a section get
    /// empty options.
    pub fn provider_options(&self, provider: Provider) -> ProviderOptions {
        match provider {
            Provider::Kubectl => ProviderOptions {
                namespace: self.kubectl.namespace.clone(),
                ..Default::default()
            },
            Provider::Aws => ProviderOptions {
                region: self.aws.region.clone(),
                profile: self.aws.profile.clone(),
                ..Default::default()
            },
            Provider::Azure => ProviderOptions {
                region: self.azure.location.clone(),
                subscription: self.azure.subscription.clone(),
                resource_group: self.azure.resource_group.clone(),
                ..Default::default()
            },
            Provider::Gcp => ProviderOptions {
                region: self.gcp.zone.clone(),
                project: self.gcp.project.clone(),
                ..Default::default()
            },
            _ => ProviderOptions::default(),
        }
    }
}
