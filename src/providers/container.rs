//! Container orchestration: kubectl and helm.

use super::{ProviderOptions, TranslateError};
use crate::dispatch::plan::CommandPlan;
use crate::dispatch::provider::Provider;
use crate::dispatch::verb::Verb;

const DEFAULT_NAMESPACE: &str = "default";

const KUBECTL_VERBS: &[Verb] = &[
    Verb::Install,
    Verb::Uninstall,
    Verb::Create,
    Verb::Delete,
    Verb::Status,
    Verb::Describe,
    Verb::Start,
    Verb::Stop,
    Verb::Restart,
    Verb::Logs,
    Verb::List,
];

const HELM_VERBS: &[Verb] = &[
    Verb::Install,
    Verb::Uninstall,
    Verb::Status,
    Verb::Upgrade,
    Verb::List,
    Verb::Search,
];

pub fn supports_verb(provider: Provider, verb: Verb) -> bool {
    match provider {
        Provider::Kubectl => KUBECTL_VERBS.contains(&verb),
        Provider::Helm => HELM_VERBS.contains(&verb),
        _ => false,
    }
}

/// Split `kind/name` at the first slash.
fn split_resource(target: &str) -> Option<(&str, &str)> {
    target.split_once('/')
}

/// Object arguments for `kubectl describe` and `kubectl rollout restart`:
/// `deployment/nginx` becomes `deployment nginx`.
fn object_args(target: &str) -> Vec<String> {
    match split_resource(target) {
        Some((kind, name)) => vec![kind.to_string(), name.to_string()],
        None => vec![target.to_string()],
    }
}

pub fn kubectl(
    verb: Verb,
    target: &str,
    options: &ProviderOptions,
) -> Result<CommandPlan, TranslateError> {
    let namespace = options.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE);

    let (mut args, note): (Vec<String>, Option<String>) = match verb {
        Verb::Install | Verb::Create => (vec!["apply".into(), "-f".into(), target.into()], None),
        Verb::Uninstall | Verb::Delete => {
            (vec!["delete".into(), "-f".into(), target.into()], None)
        }
        Verb::Status | Verb::Describe => {
            let mut args = vec!["describe".to_string()];
            args.extend(object_args(target));
            (args, None)
        }
        Verb::Start | Verb::Stop | Verb::Restart => {
            let mut args = vec!["rollout".to_string(), "restart".to_string()];
            args.extend(object_args(target));
            let note = (verb != Verb::Restart).then(|| {
                format!("kubectl has no {verb}; {target} is rolled out again instead")
            });
            (args, note)
        }
        Verb::Logs => (vec!["logs".into(), target.into()], None),
        Verb::List => (vec!["get".into(), target.into()], None),
        _ => return Err(TranslateError::not_implemented(verb, Provider::Kubectl.name())),
    };
    args.extend(["-n".to_string(), namespace.to_string()]);

    let plan = CommandPlan::new("kubectl", args);
    Ok(match note {
        Some(note) => plan.with_note(note),
        None => plan,
    })
}

pub fn helm(verb: Verb, target: &str) -> Result<CommandPlan, TranslateError> {
    let plan = match verb {
        Verb::Install | Verb::Uninstall | Verb::Status | Verb::Upgrade => {
            CommandPlan::new("helm", [verb.as_str(), target])
        }
        Verb::List => CommandPlan::new("helm", ["list"]),
        Verb::Search => CommandPlan::new("helm", ["search", "repo", target]),
        _ => return Err(TranslateError::not_implemented(verb, Provider::Helm.name())),
    };
    Ok(plan)
}
