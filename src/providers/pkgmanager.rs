//! OS package managers.

use super::TranslateError;
use crate::dispatch::plan::CommandPlan;
use crate::dispatch::provider::Provider;
use crate::dispatch::verb::{ProviderCategory, Verb};

/// Translate a package verb for one of the six OS package managers.
pub fn translate(provider: Provider, verb: Verb, target: &str) -> Result<CommandPlan, TranslateError> {
    let plan = match provider {
        Provider::Apt => apt(verb, target),
        Provider::Rpm => rpm(verb, target),
        Provider::Brew => brew(verb, target),
        Provider::Winget => winget(verb, target),
        Provider::Pacman => pacman(verb, target),
        Provider::Zypper => zypper(verb, target),
        _ => None,
    };
    plan.ok_or_else(|| TranslateError::not_implemented(verb, provider.name()))
}

/// Every OS verb has a row, except rpm upgrade.
pub fn supports_verb(provider: Provider, verb: Verb) -> bool {
    ProviderCategory::Os.accepts(verb) && !(provider == Provider::Rpm && verb == Verb::Upgrade)
}

fn apt(verb: Verb, target: &str) -> Option<CommandPlan> {
    let plan = match verb {
        Verb::Install => CommandPlan::new("apt-get", ["install", "-y", target]),
        Verb::Uninstall => CommandPlan::new("apt-get", ["remove", "-y", target]),
        Verb::Status => CommandPlan::new("dpkg", ["-s", target]),
        Verb::List => CommandPlan::new("apt", ["list", "--installed"]),
        Verb::Search => CommandPlan::new("apt-cache", ["search", target]),
        Verb::Upgrade => CommandPlan::new("apt-get", ["upgrade", "-y", target]),
        Verb::Info => CommandPlan::new("apt-cache", ["show", target]),
        _ => return None,
    };
    Some(plan)
}

// rpm installs from package files and has no upgrade-by-name.
fn rpm(verb: Verb, target: &str) -> Option<CommandPlan> {
    let plan = match verb {
        Verb::Install => CommandPlan::new("rpm", ["-i", target]),
        Verb::Uninstall => CommandPlan::new("rpm", ["-e", target]),
        Verb::Status => CommandPlan::new("rpm", ["-q", target]),
        Verb::List => CommandPlan::new("rpm", ["-qa"]),
        Verb::Search => CommandPlan::new("rpm", vec!["-qa".to_string(), format!("*{target}*")]),
        Verb::Info => CommandPlan::new("rpm", ["-qi", target]),
        _ => return None,
    };
    Some(plan)
}

fn brew(verb: Verb, target: &str) -> Option<CommandPlan> {
    let plan = match verb {
        Verb::Install => CommandPlan::new("brew", ["install", target]),
        Verb::Uninstall => CommandPlan::new("brew", ["uninstall", target]),
        Verb::Status | Verb::Info => CommandPlan::new("brew", ["info", target]),
        Verb::List => CommandPlan::new("brew", ["list"]),
        Verb::Search => CommandPlan::new("brew", ["search", target]),
        Verb::Upgrade => CommandPlan::new("brew", ["upgrade", target]),
        _ => return None,
    };
    Some(plan)
}

fn winget(verb: Verb, target: &str) -> Option<CommandPlan> {
    let plan = match verb {
        Verb::Install => CommandPlan::new("winget", ["install", target]),
        Verb::Uninstall => CommandPlan::new("winget", ["uninstall", target]),
        Verb::Status => CommandPlan::new("winget", ["list", target]),
        Verb::List => CommandPlan::new("winget", ["list"]),
        Verb::Search => CommandPlan::new("winget", ["search", target]),
        Verb::Upgrade => CommandPlan::new("winget", ["upgrade", target]),
        Verb::Info => CommandPlan::new("winget", ["show", target]),
        _ => return None,
    };
    Some(plan)
}

// Mutating pacman operations get --noconfirm. Upgrade is a full system
// upgrade; pacman does not do partial upgrades.
fn pacman(verb: Verb, target: &str) -> Option<CommandPlan> {
    let plan = match verb {
        Verb::Install => CommandPlan::new("pacman", ["-S", "--noconfirm", target]),
        Verb::Uninstall => CommandPlan::new("pacman", ["-R", "--noconfirm", target]),
        Verb::Status => CommandPlan::new("pacman", ["-Qi", target]),
        Verb::List => CommandPlan::new("pacman", ["-Q"]),
        Verb::Search => CommandPlan::new("pacman", ["-Ss", target]),
        Verb::Upgrade => CommandPlan::new("pacman", ["-Syu", "--noconfirm"])
            .with_note(format!(
                "pacman upgrades the whole system, not only {target}"
            )),
        Verb::Info => CommandPlan::new("pacman", ["-Si", target]),
        _ => return None,
    };
    Some(plan)
}

fn zypper(verb: Verb, target: &str) -> Option<CommandPlan> {
    let plan = match verb {
        Verb::Install => CommandPlan::new("zypper", ["install", "-y", target]),
        Verb::Uninstall => CommandPlan::new("zypper", ["remove", "-y", target]),
        Verb::Status | Verb::Info => CommandPlan::new("zypper", ["info", target]),
        Verb::List => CommandPlan::new("zypper", ["packages", "--installed-only"]),
        Verb::Search => CommandPlan::new("zypper", ["search", target]),
        Verb::Upgrade => CommandPlan::new("zypper", ["update", "-y", target]),
        _ => return None,
    };
    Some(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(provider: Provider, verb: Verb) -> String {
        translate(provider, verb, "nginx").unwrap().command_line()
    }

    #[test]
    fn test_apt() {
        assert_eq!(line(Provider::Apt, Verb::Install), "apt-get install -y nginx");
        assert_eq!(line(Provider::Apt, Verb::Uninstall), "apt-get remove -y nginx");
        assert_eq!(line(Provider::Apt, Verb::Status), "dpkg -s nginx");
        assert_eq!(line(Provider::Apt, Verb::List), "apt list --installed");
        assert_eq!(line(Provider::Apt, Verb::Search), "apt-cache search nginx");
        assert_eq!(line(Provider::Apt, Verb::Upgrade), "apt-get upgrade -y nginx");
        assert_eq!(line(Provider::Apt, Verb::Info), "apt-cache show nginx");
    }

    #[test]
    fn test_rpm() {
        assert_eq!(line(Provider::Rpm, Verb::Install), "rpm -i nginx");
        assert_eq!(line(Provider::Rpm, Verb::Uninstall), "rpm -e nginx");
        assert_eq!(line(Provider::Rpm, Verb::Status), "rpm -q nginx");
        assert_eq!(line(Provider::Rpm, Verb::List), "rpm -qa");
        assert_eq!(
            translate(Provider::Rpm, Verb::Search, "nginx").unwrap().args,
            vec!["-qa", "*nginx*"]
        );
        assert_eq!(line(Provider::Rpm, Verb::Info), "rpm -qi nginx");
    }

    #[test]
    fn test_rpm_has_no_upgrade() {
        let err = translate(Provider::Rpm, Verb::Upgrade, "nginx").unwrap_err();
        assert_eq!(err.to_string(), "action 'upgrade' is not implemented for rpm");
    }

    #[test]
    fn test_pacman_flags() {
        assert_eq!(line(Provider::Pacman, Verb::Install), "pacman -S --noconfirm nginx");
        assert_eq!(line(Provider::Pacman, Verb::Uninstall), "pacman -R --noconfirm nginx");
        assert_eq!(line(Provider::Pacman, Verb::Status), "pacman -Qi nginx");
        assert_eq!(line(Provider::Pacman, Verb::List), "pacman -Q");
        assert_eq!(line(Provider::Pacman, Verb::Search), "pacman -Ss nginx");
        assert_eq!(line(Provider::Pacman, Verb::Info), "pacman -Si nginx");

        let upgrade = translate(Provider::Pacman, Verb::Upgrade, "nginx").unwrap();
        assert_eq!(upgrade.command_line(), "pacman -Syu --noconfirm");
        assert_eq!(upgrade.notes.len(), 1);
    }

    #[test]
    fn test_brew() {
        assert_eq!(line(Provider::Brew, Verb::Install), "brew install nginx");
        assert_eq!(line(Provider::Brew, Verb::Uninstall), "brew uninstall nginx");
        assert_eq!(line(Provider::Brew, Verb::Status), "brew info nginx");
        assert_eq!(line(Provider::Brew, Verb::List), "brew list");
        assert_eq!(line(Provider::Brew, Verb::Search), "brew search nginx");
        assert_eq!(line(Provider::Brew, Verb::Upgrade), "brew upgrade nginx");
        assert_eq!(line(Provider::Brew, Verb::Info), "brew info nginx");
    }

    #[test]
    fn test_winget() {
        assert_eq!(line(Provider::Winget, Verb::Install), "winget install nginx");
        assert_eq!(line(Provider::Winget, Verb::Uninstall), "winget uninstall nginx");
        assert_eq!(line(Provider::Winget, Verb::Status), "winget list nginx");
        assert_eq!(line(Provider::Winget, Verb::List), "winget list");
        assert_eq!(line(Provider::Winget, Verb::Search), "winget search nginx");
        assert_eq!(line(Provider::Winget, Verb::Upgrade), "winget upgrade nginx");
        assert_eq!(line(Provider::Winget, Verb::Info), "winget show nginx");
    }

    #[test]
    fn test_zypper() {
        assert_eq!(line(Provider::Zypper, Verb::Install), "zypper install -y nginx");
        assert_eq!(line(Provider::Zypper, Verb::Uninstall), "zypper remove -y nginx");
        assert_eq!(line(Provider::Zypper, Verb::Status), "zypper info nginx");
        assert_eq!(line(Provider::Zypper, Verb::List), "zypper packages --installed-only");
        assert_eq!(line(Provider::Zypper, Verb::Search), "zypper search nginx");
        assert_eq!(line(Provider::Zypper, Verb::Upgrade), "zypper update -y nginx");
        assert_eq!(line(Provider::Zypper, Verb::Info), "zypper info nginx");
    }

    #[test]
    fn test_supports_verb_matches_rows() {
        for provider in Provider::in_category(ProviderCategory::Os) {
            for verb in Verb::ALL {
                assert_eq!(
                    supports_verb(provider, verb),
                    translate(provider, verb, "nginx").is_ok(),
                    "{provider} {verb}"
                );
            }
        }
    }

    #[test]
    fn test_non_package_verbs_are_not_implemented() {
        for provider in [Provider::Apt, Provider::Brew, Provider::Zypper] {
            for verb in [Verb::Start, Verb::Create, Verb::Logs] {
                assert!(matches!(
                    translate(provider, verb, "nginx"),
                    Err(TranslateError::NotImplemented { .. })
                ));
            }
        }
    }
}
