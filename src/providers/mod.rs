//! Category translators.
//!
//! Each translator is a pure function from (verb, target, options) to the
//! external command that would carry the verb out. Nothing here runs a
//! process.
//!
//! - [`pkgmanager`]: apt, rpm, brew, winget, pacman, zypper
//! - [`service`]: systemd, brew services
//! - [`container`]: kubectl, helm
//! - [`cloud`]: aws, azure, gcp

pub mod cloud;
pub mod container;
pub mod pkgmanager;
pub mod service;

use thiserror::Error;

use crate::dispatch::plan::CommandPlan;
use crate::dispatch::provider::{Provider, ServiceManager};
use crate::dispatch::verb::Verb;

/// Category-specific knobs. Every field is optional; translators fall back
/// to a fixed default where one exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderOptions {
    /// kubectl namespace
    pub namespace: Option<String>,
    /// AWS region, Azure location or GCP zone
    pub region: Option<String>,
    /// AWS named profile
    pub profile: Option<String>,
    /// Azure subscription
    pub subscription: Option<String>,
    /// Azure resource group
    pub resource_group: Option<String>,
    /// GCP project
    pub project: Option<String>,
}

impl ProviderOptions {
    /// Fields set in `overrides` win over fields set in `self`.
    pub fn overlay(&self, overrides: &ProviderOptions) -> ProviderOptions {
        fn pick(base: &Option<String>, over: &Option<String>) -> Option<String> {
            over.clone().or_else(|| base.clone())
        }

        ProviderOptions {
            namespace: pick(&self.namespace, &overrides.namespace),
            region: pick(&self.region, &overrides.region),
            profile: pick(&self.profile, &overrides.profile),
            subscription: pick(&self.subscription, &overrides.subscription),
            resource_group: pick(&self.resource_group, &overrides.resource_group),
            project: pick(&self.project, &overrides.project),
        }
    }
}

/// Why a translator produced no command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("action '{verb}' is not implemented for {provider}")]
    NotImplemented { verb: Verb, provider: String },

    #[error("resource type '{resource_type}' is not supported for {provider} {verb}")]
    UnsupportedResource {
        verb: Verb,
        provider: String,
        resource_type: String,
    },

    #[error("{provider} is misconfigured: {reason}")]
    Misconfigured { provider: String, reason: String },
}

impl TranslateError {
    pub fn code(&self) -> &'static str {
        match self {
            TranslateError::NotImplemented { .. } => "translate.not_implemented",
            TranslateError::UnsupportedResource { .. } => "translate.unsupported_resource",
            TranslateError::Misconfigured { .. } => "translate.misconfigured",
        }
    }

    pub(crate) fn not_implemented(verb: Verb, provider: impl Into<String>) -> Self {
        TranslateError::NotImplemented {
            verb,
            provider: provider.into(),
        }
    }
}

/// Translate a verb for a named provider.
pub fn translate(
    provider: Provider,
    verb: Verb,
    target: &str,
    options: &ProviderOptions,
) -> Result<CommandPlan, TranslateError> {
    match provider {
        Provider::Rpm
        | Provider::Apt
        | Provider::Brew
        | Provider::Winget
        | Provider::Pacman
        | Provider::Zypper => pkgmanager::translate(provider, verb, target),
        Provider::Helm => container::helm(verb, target),
        Provider::Kubectl => container::kubectl(verb, target, options),
        Provider::Aws => cloud::aws(verb, target, options),
        Provider::Azure => cloud::azure(verb, target, options),
        Provider::Gcp => cloud::gcp(verb, target, options),
    }
}

/// Translate a service verb for the host's service manager.
pub fn translate_service(
    manager: ServiceManager,
    verb: Verb,
    target: &str,
) -> Result<CommandPlan, TranslateError> {
    match manager {
        ServiceManager::Systemd => service::systemd(verb, target),
        ServiceManager::BrewServices => service::brew_services(verb, target),
    }
}

/// Whether the provider's translator has a row for the verb.
pub fn supports_verb(provider: Provider, verb: Verb) -> bool {
    match provider {
        Provider::Rpm
        | Provider::Apt
        | Provider::Brew
        | Provider::Winget
        | Provider::Pacman
        | Provider::Zypper => pkgmanager::supports_verb(provider, verb),
        Provider::Helm | Provider::Kubectl => container::supports_verb(provider, verb),
        Provider::Aws | Provider::Azure | Provider::Gcp => cloud::supports_verb(verb),
    }
}
