//! Resolve, plan, then either print or run.

use serde::Serialize;
use serde_json::json;

use super::catalog::SoftwareCatalog;
use super::error::DispatchError;
use super::plan::CommandPlan;
use super::route::{DispatchRequest, Handler, ResolvedRoute, resolve, validate_target};
use super::runner::{CommandRunner, DuctRunner, ExecutionOutput};
use crate::common::config::SaiConfig;
use crate::common::distro::HostProfile;
use crate::providers::{self, ProviderOptions};
use crate::ui::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DispatchOutcome {
    DryRun {
        route: ResolvedRoute,
        plan: CommandPlan,
    },
    Executed {
        route: ResolvedRoute,
        plan: CommandPlan,
        output: ExecutionOutput,
    },
}

impl DispatchOutcome {
    pub fn plan(&self) -> &CommandPlan {
        match self {
            DispatchOutcome::DryRun { plan, .. } | DispatchOutcome::Executed { plan, .. } => plan,
        }
    }

    pub fn route(&self) -> &ResolvedRoute {
        match self {
            DispatchOutcome::DryRun { route, .. } | DispatchOutcome::Executed { route, .. } => {
                route
            }
        }
    }

    pub fn output(&self) -> Option<&ExecutionOutput> {
        match self {
            DispatchOutcome::DryRun { .. } => None,
            DispatchOutcome::Executed { output, .. } => Some(output),
        }
    }
}

/// Per-target results of a wildcard dispatch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<(String, DispatchOutcome)>,
    pub failed: Vec<(String, DispatchError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Dispatcher<R: CommandRunner = DuctRunner> {
    host: HostProfile,
    config: SaiConfig,
    overrides: ProviderOptions,
    runner: R,
}

impl Dispatcher<DuctRunner> {
    pub fn new(host: HostProfile, config: SaiConfig) -> Self {
        Self::with_runner(host, config, DuctRunner)
    }
}

impl<R: CommandRunner> Dispatcher<R> {
    pub fn with_runner(host: HostProfile, config: SaiConfig, runner: R) -> Self {
        Self {
            host,
            config,
            overrides: ProviderOptions::default(),
            runner,
        }
    }

    /// Options given on the command line; they win over the config file.
    pub fn with_overrides(mut self, overrides: ProviderOptions) -> Self {
        self.overrides = overrides;
        self
    }

    /// Dispatch a single target. `*` must go through [`Dispatcher::dispatch_all`].
    pub fn dispatch(&self, request: &DispatchRequest) -> Result<DispatchOutcome, DispatchError> {
        if request.is_wildcard() {
            return Err(DispatchError::UnrecognizedTarget(request.target.clone()));
        }
        let route = self.resolve(request)?;
        self.dispatch_route(&route, request)
    }

    /// Dispatch the request once per catalog name, in catalog order.
    ///
    /// The route is resolved once; a resolution error aborts the whole batch.
    /// Translation and execution failures are reported per name and the loop
    /// carries on.
    pub fn dispatch_all(
        &self,
        request: &DispatchRequest,
        catalog: &dyn SoftwareCatalog,
    ) -> Result<BatchReport, DispatchError> {
        let names = catalog.names();
        if names.is_empty() {
            return Err(DispatchError::NoManagedSoftware);
        }

        let route = self.resolve(request)?;
        emit(
            Level::Info,
            "dispatch.batch",
            &format!("Running '{}' for {} managed packages", route.verb, names.len()),
            Some(json!({ "verb": route.verb, "targets": names })),
        );

        let mut report = BatchReport::default();
        for name in names {
            let result = validate_target(&name)
                .and_then(|_| self.dispatch_route(&route, &request.retarget(&name)));
            match result {
                Ok(outcome) => report.succeeded.push((name, outcome)),
                Err(err) => {
                    emit(
                        Level::Error,
                        err.code(),
                        &format!("{name}: {err}"),
                        Some(json!({ "target": name })),
                    );
                    report.failed.push((name, err));
                }
            }
        }
        Ok(report)
    }

    fn resolve(&self, request: &DispatchRequest) -> Result<ResolvedRoute, DispatchError> {
        let route = resolve(request, &self.host)?;

        if let Some(ignored) = &route.ignored_provider {
            emit(
                Level::Warn,
                "dispatch.provider_ignored",
                &format!(
                    "Provider '{ignored}' ignored: '{}' is a service action, running it through {}",
                    route.verb,
                    route.handler.name()
                ),
                Some(json!({ "ignored": ignored, "chosen": route.handler.name() })),
            );
        }
        if let Some(rejected) = &route.unrecognized_provider {
            emit(
                Level::Warn,
                "dispatch.fallback",
                &format!(
                    "Unrecognized provider '{rejected}', using the default for {}: {}",
                    self.host,
                    route.handler.name()
                ),
                Some(json!({ "rejected": rejected, "chosen": route.handler.name() })),
            );
        }
        emit(
            Level::Debug,
            "dispatch.route",
            &format!(
                "{} {} -> {} ({})",
                request.target,
                route.verb,
                route.handler.name(),
                route.category
            ),
            None,
        );
        Ok(route)
    }

    fn build_plan(&self, route: &ResolvedRoute, target: &str) -> Result<CommandPlan, DispatchError> {
        let plan = match route.handler {
            Handler::Service(manager) => providers::translate_service(manager, route.verb, target)?,
            Handler::Provider(provider) => {
                let options = self
                    .config
                    .provider_options(provider)
                    .overlay(&self.overrides);
                providers::translate(provider, route.verb, target, &options)?
            }
        };
        Ok(plan)
    }

    fn dispatch_route(
        &self,
        route: &ResolvedRoute,
        request: &DispatchRequest,
    ) -> Result<DispatchOutcome, DispatchError> {
        let plan = self.build_plan(route, &request.target)?;
        for note in &plan.notes {
            emit(Level::Warn, "dispatch.note", note, None);
        }

        if request.dry_run {
            emit(
                Level::Info,
                "dispatch.dry_run",
                &format!("[DRY RUN] {plan}"),
                Some(json!({ "target": request.target, "route": route, "plan": plan })),
            );
            return Ok(DispatchOutcome::DryRun {
                route: route.clone(),
                plan,
            });
        }

        emit(
            Level::Info,
            "dispatch.plan",
            &format!("Running {plan}"),
            Some(json!({ "target": request.target, "plan": plan })),
        );
        let output = self.runner.run(&plan)?;
        if !output.success {
            return Err(DispatchError::ToolFailed {
                command: plan.command_line(),
                exit_code: output.exit_code,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        emit(
            Level::Success,
            "dispatch.done",
            &format!("{} {} via {}", request.target, route.verb, route.handler.name()),
            None,
        );
        Ok(DispatchOutcome::Executed {
            route: route.clone(),
            plan,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::distro::DistroFamily;
    use crate::dispatch::catalog::ListCatalog;
    use crate::dispatch::provider::{Provider, ServiceManager};
    use crate::dispatch::verb::ProviderCategory;
    use crate::providers::TranslateError;
    use std::cell::RefCell;

    /// Records every plan it is asked to run and answers with a fixed exit
    /// code.
    #[derive(Default)]
    struct RecordingRunner {
        calls: RefCell<Vec<CommandPlan>>,
        exit_code: i32,
    }

    impl RecordingRunner {
        fn failing(exit_code: i32) -> Self {
            Self {
                exit_code,
                ..Default::default()
            }
        }

        fn lines(&self) -> Vec<String> {
            self.calls.borrow().iter().map(CommandPlan::command_line).collect()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, plan: &CommandPlan) -> Result<ExecutionOutput, DispatchError> {
            self.calls.borrow_mut().push(plan.clone());
            Ok(ExecutionOutput {
                exit_code: Some(self.exit_code),
                success: self.exit_code == 0,
                stdout: "ok".into(),
                stderr: if self.exit_code == 0 {
                    String::new()
                } else {
                    "boom".into()
                },
            })
        }
    }

    fn ubuntu() -> HostProfile {
        HostProfile::linux(DistroFamily::Ubuntu)
    }

    fn dispatcher(host: HostProfile) -> Dispatcher<RecordingRunner> {
        Dispatcher::with_runner(host, SaiConfig::default(), RecordingRunner::default())
    }

    fn request(target: &str, verb: &str, provider: Option<&str>, dry_run: bool) -> DispatchRequest {
        DispatchRequest::parse(target, verb, provider, dry_run).unwrap()
    }

    #[test]
    fn test_nginx_install_on_ubuntu() {
        let d = dispatcher(ubuntu());
        let outcome = d.dispatch(&request("nginx", "install", None, false)).unwrap();
        assert_eq!(outcome.plan().command_line(), "apt-get install -y nginx");
        assert_eq!(d.runner.lines(), vec!["apt-get install -y nginx"]);
        assert_eq!(outcome.output().map(|o| o.stdout.as_str()), Some("ok"));
    }

    #[test]
    fn test_service_verb_with_package_provider_goes_to_systemd() {
        let d = dispatcher(ubuntu());
        let outcome = d
            .dispatch(&request("redis", "start", Some("apt"), false))
            .unwrap();
        assert_eq!(outcome.plan().command_line(), "systemctl start redis");
        assert_eq!(
            outcome.route().handler,
            Handler::Service(ServiceManager::Systemd)
        );
        assert_eq!(outcome.route().ignored_provider.as_deref(), Some("apt"));
    }

    #[test]
    fn test_aws_ec2_status() {
        let d = dispatcher(ubuntu());
        let outcome = d
            .dispatch(&request("ec2/i-1234567890abcdef0", "status", Some("aws"), true))
            .unwrap();
        assert_eq!(
            outcome.plan().command_line(),
            "aws ec2 describe-instances --instance-ids i-1234567890abcdef0 --region us-east-1"
        );
    }

    #[test]
    fn test_azure_create_without_resource_group_produces_no_plan() {
        let d = dispatcher(ubuntu());
        let err = d
            .dispatch(&request("vm/mywebapp", "create", Some("azure"), false))
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Translate(TranslateError::Misconfigured { .. })
        ));
        assert!(d.runner.lines().is_empty());
    }

    #[test]
    fn test_config_and_overrides_reach_translator() {
        let config = SaiConfig::parse("[azure]\nresource_group = \"cfg-rg\"").unwrap();
        let d = Dispatcher::with_runner(ubuntu(), config, RecordingRunner::default())
            .with_overrides(ProviderOptions {
                region: Some("westeurope".into()),
                ..Default::default()
            });
        let outcome = d
            .dispatch(&request("vm/web", "create", Some("azure"), true))
            .unwrap();
        let line = outcome.plan().command_line();
        assert!(line.contains("--resource-group cfg-rg"), "{line}");
        assert!(line.contains("--location westeurope"), "{line}");
    }

    #[test]
    fn test_dry_run_never_runs_and_is_repeatable() {
        let d = dispatcher(HostProfile::linux(DistroFamily::Arch));
        let req = request("nginx", "install", None, true);
        let first = d.dispatch(&req).unwrap();
        let second = d.dispatch(&req).unwrap();
        assert_eq!(first, second);
        assert!(matches!(first, DispatchOutcome::DryRun { .. }));
        assert_eq!(first.plan().command_line(), "pacman -S --noconfirm nginx");
        assert!(d.runner.lines().is_empty());
    }

    #[test]
    fn test_tool_failure_carries_output() {
        let d = Dispatcher::with_runner(ubuntu(), SaiConfig::default(), RecordingRunner::failing(100));
        let err = d.dispatch(&request("nginx", "status", None, false)).unwrap_err();
        match err {
            DispatchError::ToolFailed {
                command,
                exit_code,
                stderr,
                ..
            } => {
                assert_eq!(command, "dpkg -s nginx");
                assert_eq!(exit_code, Some(100));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(d.runner.lines().len(), 1);
    }

    #[test]
    fn test_unrecognized_provider_falls_back() {
        let d = dispatcher(HostProfile::linux(DistroFamily::RedHat));
        let outcome = d
            .dispatch(&request("nginx", "install", Some("yum"), true))
            .unwrap();
        assert_eq!(outcome.route().handler, Handler::Provider(Provider::Rpm));
        assert_eq!(outcome.route().unrecognized_provider.as_deref(), Some("yum"));
    }

    #[test]
    fn test_not_implemented_is_an_error() {
        let d = dispatcher(HostProfile::linux(DistroFamily::RedHat));
        let err = d.dispatch(&request("nginx", "upgrade", None, true)).unwrap_err();
        assert_eq!(err.code(), "translate.not_implemented");
    }

    #[test]
    fn test_single_dispatch_rejects_wildcard() {
        let d = dispatcher(ubuntu());
        assert!(d.dispatch(&request("*", "install", None, true)).is_err());
    }

    #[test]
    fn test_dispatch_all_continues_past_failures() {
        let d = dispatcher(ubuntu());
        let catalog = ListCatalog::new(["nginx", "bad name", "redis"]);
        let report = d
            .dispatch_all(&request("*", "install", None, false), &catalog)
            .unwrap();

        assert!(!report.is_success());
        let done: Vec<&str> = report.succeeded.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(done, vec!["nginx", "redis"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "bad name");
        assert_eq!(
            d.runner.lines(),
            vec!["apt-get install -y nginx", "apt-get install -y redis"]
        );
    }

    #[test]
    fn test_dispatch_all_translator_failures_are_local() {
        let d = dispatcher(ubuntu());
        let catalog = ListCatalog::new(["ec2/web", "lambda/fn"]);
        let report = d
            .dispatch_all(&request("*", "status", Some("aws"), true), &catalog)
            .unwrap();
        assert_eq!(report.succeeded.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].1.code(), "translate.unsupported_resource");
    }

    #[test]
    fn test_dispatch_all_aborts_on_resolution_error() {
        let d = dispatcher(ubuntu());
        let catalog = ListCatalog::new(["nginx"]);
        let err = d
            .dispatch_all(&request("*", "create", None, true), &catalog)
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::VerbNotValidForCategory {
                category: ProviderCategory::Os,
                ..
            }
        ));
    }

    #[test]
    fn test_dispatch_all_empty_catalog() {
        let d = dispatcher(ubuntu());
        let err = d
            .dispatch_all(
                &request("*", "install", None, true),
                &ListCatalog::new(Vec::<String>::new()),
            )
            .unwrap_err();
        assert!(matches!(err, DispatchError::NoManagedSoftware));
    }
}
