//! Request validation and route resolution.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::error::DispatchError;
use super::provider::{Provider, ServiceManager, default_os_provider};
use super::verb::{ProviderCategory, Verb};
use crate::common::distro::HostProfile;

/// Target that expands to every managed software name.
pub const WILDCARD: &str = "*";

lazy_static! {
    // A plain name, or one `type/name` pair.
    static ref TARGET_RE: Regex = Regex::new(r"^[A-Za-z0-9_-]+(/[A-Za-z0-9_-]+)?$")
        .expect("target pattern is valid");
}

/// Reject targets that are not plain names before anything else happens.
pub fn validate_target(target: &str) -> Result<(), DispatchError> {
    if target == WILDCARD || TARGET_RE.is_match(target) {
        Ok(())
    } else {
        Err(DispatchError::UnrecognizedTarget(target.to_string()))
    }
}

/// One invocation's worth of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    pub target: String,
    pub verb: Verb,
    pub provider: Option<String>,
    pub dry_run: bool,
}

impl DispatchRequest {
    /// Build a request from raw text, validating the target and parsing the
    /// verb.
    pub fn parse(
        target: &str,
        verb: &str,
        provider: Option<&str>,
        dry_run: bool,
    ) -> Result<Self, DispatchError> {
        validate_target(target)?;
        let verb: Verb = verb.parse()?;
        Ok(Self {
            target: target.to_string(),
            verb,
            provider: provider.map(str::to_string),
            dry_run,
        })
    }

    pub fn is_wildcard(&self) -> bool {
        self.target == WILDCARD
    }

    /// Same request aimed at another target; used when expanding `*`.
    pub fn retarget(&self, target: &str) -> Self {
        Self {
            target: target.to_string(),
            ..self.clone()
        }
    }

    fn provider_hint(&self) -> Option<&str> {
        self.provider
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Who handles a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Handler {
    Service(ServiceManager),
    Provider(Provider),
}

impl Handler {
    pub fn name(&self) -> &'static str {
        match self {
            Handler::Service(manager) => manager.name(),
            Handler::Provider(provider) => provider.name(),
        }
    }
}

/// The outcome of resolution. Only ever built for a verb that is valid in
/// its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    pub handler: Handler,
    pub category: ProviderCategory,
    pub verb: Verb,
    /// Provider string dropped because service verbs never look at it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored_provider: Option<String>,
    /// Provider string that matched nothing; the host default was used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unrecognized_provider: Option<String>,
}

/// Resolve a request against a host.
///
/// 1. Service verbs go to the host's service manager, whatever the provider.
/// 2. A recognized provider is used as named.
/// 3. No provider, or an unrecognized one, means the host's default OS
///    package manager.
/// 4. The verb must be valid for the resulting category.
pub fn resolve(request: &DispatchRequest, host: &HostProfile) -> Result<ResolvedRoute, DispatchError> {
    let verb = request.verb;
    let hint = request.provider_hint();

    if verb.is_service_verb() {
        let manager = ServiceManager::for_host(host)
            .ok_or_else(|| DispatchError::NoServiceManager(host.to_string()))?;
        return Ok(ResolvedRoute {
            handler: Handler::Service(manager),
            category: ProviderCategory::Service,
            verb,
            ignored_provider: hint.map(str::to_string),
            unrecognized_provider: None,
        });
    }

    let (provider, unrecognized) = match hint {
        Some(raw) => match Provider::classify(raw) {
            Some(provider) => (provider, None),
            None => (default_os_provider(host), Some(raw.to_string())),
        },
        None => (default_os_provider(host), None),
    };

    let category = provider.category();
    if !category.accepts(verb) {
        return Err(DispatchError::VerbNotValidForCategory { verb, category });
    }

    Ok(ResolvedRoute {
        handler: Handler::Provider(provider),
        category,
        verb,
        ignored_provider: None,
        unrecognized_provider: unrecognized,
    })
}
