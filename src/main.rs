mod common;
mod dispatch;
mod providers;
mod ui;

use anyhow::{Result, bail};
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;

use crate::common::config::SaiConfig;
use crate::common::distro::HostProfile;
use crate::dispatch::{DispatchError, DispatchOutcome, DispatchRequest, Dispatcher, catalog, listing};
use crate::providers::ProviderOptions;
use crate::ui::prelude::*;

/// Run one verb against a piece of software, whatever manages it
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Software name, `type/name` resource, or `*` for every managed package
    #[arg(required_unless_present = "list_providers")]
    target: Option<String>,

    /// Action: install, uninstall, status, list, search, upgrade, info, start,
    /// stop, restart, enable, disable, create, delete, logs, describe
    #[arg(required_unless_present = "list_providers")]
    verb: Option<String>,

    /// Provider to use (apt, rpm, brew, winget, pacman, zypper, helm, kubectl, aws, azure, gcp)
    #[arg(short, long)]
    provider: Option<String>,

    /// Print the command instead of running it
    #[arg(long)]
    dry_run: bool,

    /// Kubernetes namespace
    #[arg(long)]
    namespace: Option<String>,

    /// Cloud region, location or zone
    #[arg(long)]
    region: Option<String>,

    /// AWS named profile
    #[arg(long)]
    profile: Option<String>,

    /// Azure subscription
    #[arg(long)]
    subscription: Option<String>,

    /// Azure resource group
    #[arg(long)]
    resource_group: Option<String>,

    /// GCP project
    #[arg(long)]
    project: Option<String>,

    /// Config file (defaults to ~/.config/sai/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Show debug messages
    #[arg(short, long)]
    debug: bool,

    /// List every provider and the verbs it accepts
    #[arg(long)]
    list_providers: bool,
}

impl Cli {
    fn overrides(&self) -> ProviderOptions {
        ProviderOptions {
            namespace: self.namespace.clone(),
            region: self.region.clone(),
            profile: self.profile.clone(),
            subscription: self.subscription.clone(),
            resource_group: self.resource_group.clone(),
            project: self.project.clone(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    ui::init(cli.output, !cli.no_color);
    ui::set_debug_mode(cli.debug);

    if let Err(err) = run(&cli) {
        report_error(&err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let host = HostProfile::detect();
    emit(
        Level::Debug,
        "host.detected",
        &format!("Host: {host}"),
        Some(json!({ "host": host })),
    );

    if cli.list_providers {
        print_providers(&host);
        return Ok(());
    }

    let (Some(target), Some(verb)) = (cli.target.as_deref(), cli.verb.as_deref()) else {
        bail!("a target and a verb are required");
    };
    let request = DispatchRequest::parse(target, verb, cli.provider.as_deref(), cli.dry_run)?;

    let config = SaiConfig::load(cli.config.as_deref())?;
    let catalog = catalog::from_config(&config);
    let dispatcher = Dispatcher::new(host, config).with_overrides(cli.overrides());

    if request.is_wildcard() {
        let report = dispatcher.dispatch_all(&request, catalog.as_ref())?;
        for (_, outcome) in &report.succeeded {
            print_outcome(outcome);
        }
        if !report.is_success() {
            let failed: Vec<&str> = report.failed.iter().map(|(n, _)| n.as_str()).collect();
            bail!(
                "{} of {} managed packages failed: {}",
                failed.len(),
                failed.len() + report.succeeded.len(),
                failed.join(", ")
            );
        }
        return Ok(());
    }

    let outcome = dispatcher.dispatch(&request)?;
    print_outcome(&outcome);
    Ok(())
}

fn print_providers(host: &HostProfile) {
    let rows = listing::provider_rows(host);
    match get_output_format() {
        OutputFormat::Text => println!("{}", listing::render_table(&rows)),
        OutputFormat::Json => emit(
            Level::Info,
            "providers.list",
            &format!("{} providers", rows.len()),
            Some(json!({ "host": host, "providers": rows })),
        ),
    }
}

/// Pass the tool's own output through untouched.
fn print_outcome(outcome: &DispatchOutcome) {
    if let Some(output) = outcome.output() {
        print_tool_output(output.stdout.as_str(), output.stderr.as_str());
        if get_output_format() == OutputFormat::Json {
            emit(
                Level::Info,
                "dispatch.output",
                "Captured tool output",
                Some(json!({
                    "route": outcome.route(),
                    "plan": outcome.plan(),
                    "output": output,
                })),
            );
        }
    }
}

fn print_tool_output(stdout: &str, stderr: &str) {
    if get_output_format() == OutputFormat::Json {
        return;
    }
    if !stdout.is_empty() {
        print!("{stdout}");
    }
    if !stderr.is_empty() {
        eprint!("{stderr}");
    }
}

fn report_error(err: &anyhow::Error) {
    let Some(dispatch_err) = err.downcast_ref::<DispatchError>() else {
        emit(Level::Error, "sai.error", &format!("Error: {err:#}"), None);
        return;
    };

    let data = match dispatch_err {
        DispatchError::ToolFailed {
            command,
            exit_code,
            stdout,
            stderr,
        } => {
            print_tool_output(stdout, stderr);
            Some(json!({
                "command": command,
                "exit_code": exit_code,
                "stdout": stdout,
                "stderr": stderr,
            }))
        }
        _ => None,
    };
    emit(
        Level::Error,
        dispatch_err.code(),
        &format!("Error: {dispatch_err}"),
        data,
    );
}
