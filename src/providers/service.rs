//! Service managers.

use super::TranslateError;
use crate::dispatch::plan::CommandPlan;
use crate::dispatch::provider::ServiceManager;
use crate::dispatch::verb::Verb;

/// `systemctl <verb> <unit>` for every service verb.
pub fn systemd(verb: Verb, target: &str) -> Result<CommandPlan, TranslateError> {
    if !verb.is_service_verb() {
        return Err(TranslateError::not_implemented(
            verb,
            ServiceManager::Systemd.name(),
        ));
    }
    Ok(CommandPlan::new("systemctl", [verb.as_str(), target]))
}

/// `brew services` has no enable/disable; they degrade to start/stop,
/// which also register or unregister the launch agent.
pub fn brew_services(verb: Verb, target: &str) -> Result<CommandPlan, TranslateError> {
    let plan = match verb {
        Verb::Start | Verb::Stop | Verb::Restart => {
            CommandPlan::new("brew", ["services", verb.as_str(), target])
        }
        Verb::Enable => CommandPlan::new("brew", ["services", "start", target]).with_note(
            format!("brew services has no enable; starting {target} registers it to run at login"),
        ),
        Verb::Disable => CommandPlan::new("brew", ["services", "stop", target]).with_note(
            format!("brew services has no disable; stopping {target} unregisters it from login"),
        ),
        _ => {
            return Err(TranslateError::not_implemented(
                verb,
                ServiceManager::BrewServices.name(),
            ));
        }
    };
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_systemd_verbs() {
        for verb in [
            Verb::Start,
            Verb::Stop,
            Verb::Restart,
            Verb::Enable,
            Verb::Disable,
        ] {
            let plan = systemd(verb, "redis").unwrap();
            assert_eq!(plan.command_line(), format!("systemctl {verb} redis"));
            assert!(plan.notes.is_empty());
        }
    }

    #[test]
    fn test_systemd_rejects_package_verbs() {
        let err = systemd(Verb::Install, "redis").unwrap_err();
        assert_eq!(err.code(), "translate.not_implemented");
    }

    #[test]
    fn test_brew_services_direct_verbs() {
        assert_eq!(
            brew_services(Verb::Restart, "redis").unwrap().command_line(),
            "brew services restart redis"
        );
    }

    #[test]
    fn test_brew_services_enable_disable_degrade_with_note() {
        let enable = brew_services(Verb::Enable, "redis").unwrap();
        assert_eq!(enable.command_line(), "brew services start redis");
        assert_eq!(enable.notes.len(), 1);

        let disable = brew_services(Verb::Disable, "redis").unwrap();
        assert_eq!(disable.command_line(), "brew services stop redis");
        assert!(disable.notes[0].contains("no disable"));
    }
}
