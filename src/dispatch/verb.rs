//! The action taxonomy: every verb sai understands and which provider
//! categories accept it.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::error::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Install,
    Uninstall,
    Status,
    List,
    Search,
    Upgrade,
    Info,
    Start,
    Stop,
    Restart,
    Enable,
    Disable,
    Create,
    Delete,
    Logs,
    Describe,
}

impl Verb {
    pub const ALL: [Verb; 16] = [
        Verb::Install,
        Verb::Uninstall,
        Verb::Status,
        Verb::List,
        Verb::Search,
        Verb::Upgrade,
        Verb::Info,
        Verb::Start,
        Verb::Stop,
        Verb::Restart,
        Verb::Enable,
        Verb::Disable,
        Verb::Create,
        Verb::Delete,
        Verb::Logs,
        Verb::Describe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Install => "install",
            Verb::Uninstall => "uninstall",
            Verb::Status => "status",
            Verb::List => "list",
            Verb::Search => "search",
            Verb::Upgrade => "upgrade",
            Verb::Info => "info",
            Verb::Start => "start",
            Verb::Stop => "stop",
            Verb::Restart => "restart",
            Verb::Enable => "enable",
            Verb::Disable => "disable",
            Verb::Create => "create",
            Verb::Delete => "delete",
            Verb::Logs => "logs",
            Verb::Describe => "describe",
        }
    }

    /// Service verbs always go to the host's service manager, whatever
    /// provider was asked for.
    pub fn is_service_verb(&self) -> bool {
        matches!(
            self,
            Verb::Start | Verb::Stop | Verb::Restart | Verb::Enable | Verb::Disable
        )
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Verb::ALL
            .iter()
            .copied()
            .find(|verb| verb.as_str() == wanted)
            .ok_or_else(|| DispatchError::UnknownVerb(s.to_string()))
    }
}

/// Grouping a provider belongs to. `Service` is reached by verb, never by
/// provider name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderCategory {
    Os,
    Container,
    Cloud,
    Service,
}

const OS_VERBS: &[Verb] = &[
    Verb::Install,
    Verb::Uninstall,
    Verb::Status,
    Verb::List,
    Verb::Search,
    Verb::Upgrade,
    Verb::Info,
];

const CONTAINER_VERBS: &[Verb] = &[
    Verb::Install,
    Verb::Uninstall,
    Verb::Status,
    Verb::Start,
    Verb::Stop,
    Verb::Restart,
    Verb::Create,
    Verb::Delete,
    Verb::List,
    Verb::Search,
    Verb::Upgrade,
    Verb::Logs,
    Verb::Describe,
];

const CLOUD_VERBS: &[Verb] = &[
    Verb::Start,
    Verb::Stop,
    Verb::Status,
    Verb::Create,
    Verb::Delete,
    Verb::List,
    Verb::Describe,
];

const SERVICE_VERBS: &[Verb] = &[
    Verb::Start,
    Verb::Stop,
    Verb::Restart,
    Verb::Enable,
    Verb::Disable,
];

impl ProviderCategory {
    pub fn valid_verbs(&self) -> &'static [Verb] {
        match self {
            ProviderCategory::Os => OS_VERBS,
            ProviderCategory::Container => CONTAINER_VERBS,
            ProviderCategory::Cloud => CLOUD_VERBS,
            ProviderCategory::Service => SERVICE_VERBS,
        }
    }

    pub fn accepts(&self, verb: Verb) -> bool {
        self.valid_verbs().contains(&verb)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProviderCategory::Os => "os",
            ProviderCategory::Container => "container",
            ProviderCategory::Cloud => "cloud",
            ProviderCategory::Service => "service",
        }
    }
}

impl fmt::Display for ProviderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_verbs() {
        for verb in Verb::ALL {
            assert_eq!(verb.as_str().parse::<Verb>().unwrap(), verb);
        }
        assert_eq!("  INSTALL ".parse::<Verb>().unwrap(), Verb::Install);
    }

    #[test]
    fn test_unknown_verb() {
        let err = "frobnicate".parse::<Verb>().unwrap_err();
        assert!(matches!(err, DispatchError::UnknownVerb(ref v) if v == "frobnicate"));
    }

    #[test]
    fn test_service_verbs() {
        let service: Vec<Verb> = Verb::ALL
            .into_iter()
            .filter(Verb::is_service_verb)
            .collect();
        assert_eq!(
            service,
            vec![
                Verb::Start,
                Verb::Stop,
                Verb::Restart,
                Verb::Enable,
                Verb::Disable
            ]
        );
        assert_eq!(ProviderCategory::Service.valid_verbs(), service.as_slice());
    }

    #[test]
    fn test_category_verb_sets() {
        assert!(ProviderCategory::Os.accepts(Verb::Install));
        assert!(!ProviderCategory::Os.accepts(Verb::Create));
        assert!(!ProviderCategory::Os.accepts(Verb::Logs));

        assert!(ProviderCategory::Container.accepts(Verb::Logs));
        assert!(!ProviderCategory::Container.accepts(Verb::Info));

        assert!(ProviderCategory::Cloud.accepts(Verb::Create));
        assert!(ProviderCategory::Cloud.accepts(Verb::Describe));
        assert!(!ProviderCategory::Cloud.accepts(Verb::Install));
    }

    #[test]
    fn test_every_verb_belongs_to_some_category() {
        let categories = [
            ProviderCategory::Os,
            ProviderCategory::Container,
            ProviderCategory::Cloud,
            ProviderCategory::Service,
        ];
        for verb in Verb::ALL {
            assert!(
                categories.iter().any(|c| c.accepts(verb)),
                "{verb} is not accepted anywhere"
            );
        }
    }
}
