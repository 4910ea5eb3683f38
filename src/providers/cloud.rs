//! Cloud platform CLIs: aws, az and gcloud/gsutil.
//!
//! Targets are `type/name`, e.g. `ec2/i-1234567890abcdef0` or
//! `storage/my-bucket`. `describe` is handled as `status` on every cloud.

use super::{ProviderOptions, TranslateError};
use crate::dispatch::plan::CommandPlan;
use crate::dispatch::provider::Provider;
use crate::dispatch::verb::{ProviderCategory, Verb};

const AWS_DEFAULT_REGION: &str = "us-east-1";
const AZURE_DEFAULT_LOCATION: &str = "eastus";
const GCP_DEFAULT_ZONE: &str = "us-central1-a";

const AWS_DEFAULT_IMAGE: &str = "ami-12345678";
const AWS_DEFAULT_INSTANCE_TYPE: &str = "t2.micro";
const AZURE_DEFAULT_IMAGE: &str = "UbuntuLTS";
const AZURE_DEFAULT_PLAN: &str = "myAppServicePlan";
const GCP_DEFAULT_MACHINE_TYPE: &str = "e2-micro";

/// A cloud target split into resource type and name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudResource<'a> {
    pub kind: &'a str,
    pub name: &'a str,
}

/// `ec2/web-1` is (`ec2`, `web-1`); a target without a slash has an empty
/// name.
pub fn parse_cloud_resource(target: &str) -> CloudResource<'_> {
    match target.split_once('/') {
        Some((kind, name)) => CloudResource { kind, name },
        None => CloudResource {
            kind: target,
            name: "",
        },
    }
}

fn to_args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The clouds cover their whole category; whether a given resource type
/// has a row is only known once the target is parsed.
pub fn supports_verb(verb: Verb) -> bool {
    ProviderCategory::Cloud.accepts(verb)
}

/// Common checks shared by the three clouds. Returns the verb to translate
/// with `describe` folded into `status`.
fn cloud_verb(provider: Provider, verb: Verb) -> Result<Verb, TranslateError> {
    if !supports_verb(verb) {
        return Err(TranslateError::not_implemented(verb, provider.name()));
    }
    Ok(match verb {
        Verb::Describe => Verb::Status,
        other => other,
    })
}

fn unsupported(provider: Provider, verb: Verb, resource: &CloudResource) -> TranslateError {
    TranslateError::UnsupportedResource {
        verb,
        provider: provider.name().to_string(),
        resource_type: resource.kind.to_string(),
    }
}

/// Listing works on a type alone and `ec2 create` launches an unnamed
/// instance; everything else addresses one named resource.
fn require_name(
    provider: Provider,
    verb: Verb,
    resource: &CloudResource,
) -> Result<(), TranslateError> {
    let needs_name = match (verb, resource.kind) {
        (Verb::List, _) => false,
        (Verb::Create, "ec2") => false,
        _ => true,
    };
    if needs_name && resource.name.is_empty() {
        return Err(TranslateError::Misconfigured {
            provider: provider.name().to_string(),
            reason: format!(
                "'{verb}' needs a resource name, e.g. {}/<name>",
                resource.kind
            ),
        });
    }
    Ok(())
}

pub fn aws(verb: Verb, target: &str, options: &ProviderOptions) -> Result<CommandPlan, TranslateError> {
    let provider = Provider::Aws;
    let verb = cloud_verb(provider, verb)?;
    let resource = parse_cloud_resource(target);
    let region = options.region.as_deref().unwrap_or(AWS_DEFAULT_REGION);
    let name = resource.name;
    let bucket = format!("s3://{name}");

    let mut args = match (verb, resource.kind) {
        (Verb::Start, "ec2") => to_args(&["ec2", "start-instances", "--instance-ids", name]),
        (Verb::Start, "rds") => {
            to_args(&["rds", "start-db-instance", "--db-instance-identifier", name])
        }
        (Verb::Stop, "ec2") => to_args(&["ec2", "stop-instances", "--instance-ids", name]),
        (Verb::Stop, "rds") => {
            to_args(&["rds", "stop-db-instance", "--db-instance-identifier", name])
        }
        (Verb::Status, "ec2") => {
            to_args(&["ec2", "describe-instances", "--instance-ids", name])
        }
        (Verb::Status, "rds") => {
            to_args(&["rds", "describe-db-instances", "--db-instance-identifier", name])
        }
        (Verb::Status, "s3") => to_args(&["s3", "ls", name]),
        (Verb::Create, "ec2") => to_args(&[
            "ec2",
            "run-instances",
            "--image-id",
            AWS_DEFAULT_IMAGE,
            "--count",
            "1",
            "--instance-type",
            AWS_DEFAULT_INSTANCE_TYPE,
        ]),
        (Verb::Create, "s3") => to_args(&["s3", "mb", &bucket]),
        (Verb::Delete, "ec2") => {
            to_args(&["ec2", "terminate-instances", "--instance-ids", name])
        }
        (Verb::Delete, "s3") => to_args(&["s3", "rb", &bucket, "--force"]),
        (Verb::List, "ec2") => to_args(&["ec2", "describe-instances"]),
        (Verb::List, "s3") => to_args(&["s3", "ls"]),
        (Verb::List, "rds") => to_args(&["rds", "describe-db-instances"]),
        _ => return Err(unsupported(provider, verb, &resource)),
    };
    require_name(provider, verb, &resource)?;

    args.extend(["--region".to_string(), region.to_string()]);
    let mut plan = CommandPlan::new("aws", args);
    if let Some(profile) = &options.profile {
        plan = plan.with_leading_args(["--profile", profile.as_str()]);
    }
    if verb == Verb::Create && resource.kind == "ec2" {
        plan = plan.with_note(format!(
            "launches a {AWS_DEFAULT_INSTANCE_TYPE} instance from image {AWS_DEFAULT_IMAGE}"
        ));
    }
    Ok(plan)
}

pub fn azure(
    verb: Verb,
    target: &str,
    options: &ProviderOptions,
) -> Result<CommandPlan, TranslateError> {
    let provider = Provider::Azure;
    let verb = cloud_verb(provider, verb)?;
    let resource = parse_cloud_resource(target);
    let location = options.region.as_deref().unwrap_or(AZURE_DEFAULT_LOCATION);
    let name = resource.name;

    let mut args = match (verb, resource.kind) {
        (Verb::Start | Verb::Stop, "vm" | "webapp") => {
            to_args(&[resource.kind, verb.as_str(), "--name", name])
        }
        (Verb::Status, "vm" | "webapp") => to_args(&[resource.kind, "show", "--name", name]),
        (Verb::Create, "vm") => to_args(&[
            "vm",
            "create",
            "--name",
            name,
            "--image",
            AZURE_DEFAULT_IMAGE,
            "--location",
            location,
        ]),
        (Verb::Create, "webapp") => to_args(&[
            "webapp",
            "create",
            "--name",
            name,
            "--plan",
            AZURE_DEFAULT_PLAN,
            "--location",
            location,
        ]),
        (Verb::Delete, "vm") => to_args(&["vm", "delete", "--name", name, "--yes"]),
        (Verb::Delete, "webapp") => to_args(&["webapp", "delete", "--name", name]),
        (Verb::List, "vm" | "webapp") => to_args(&[resource.kind, "list"]),
        _ => return Err(unsupported(provider, verb, &resource)),
    };

    let Some(group) = options.resource_group.as_deref().filter(|g| !g.is_empty()) else {
        return Err(TranslateError::Misconfigured {
            provider: provider.name().to_string(),
            reason: "no resource group configured (use --resource-group or [azure] resource_group)"
                .to_string(),
        });
    };
    require_name(provider, verb, &resource)?;

    args.extend(["--resource-group".to_string(), group.to_string()]);
    let mut plan = CommandPlan::new("az", args);
    if let Some(subscription) = &options.subscription {
        plan = plan.with_leading_args(["--subscription", subscription.as_str()]);
    }
    Ok(plan)
}

pub fn gcp(verb: Verb, target: &str, options: &ProviderOptions) -> Result<CommandPlan, TranslateError> {
    let provider = Provider::Gcp;
    let verb = cloud_verb(provider, verb)?;
    let resource = parse_cloud_resource(target);
    let zone = options.region.as_deref().unwrap_or(GCP_DEFAULT_ZONE);
    let name = resource.name;
    let bucket = format!("gs://{name}");

    let (program, args) = match (verb, resource.kind) {
        (Verb::Start | Verb::Stop | Verb::Status, "compute") => {
            let action = if verb == Verb::Status {
                "describe"
            } else {
                verb.as_str()
            };
            (
                "gcloud",
                to_args(&["compute", "instances", action, name, "--zone", zone]),
            )
        }
        (Verb::Start | Verb::Stop | Verb::Status, "sql") => {
            let action = if verb == Verb::Status {
                "describe"
            } else {
                verb.as_str()
            };
            ("gcloud", to_args(&["sql", "instances", action, name]))
        }
        (Verb::Status, "storage") => ("gsutil", to_args(&["ls", &bucket])),
        (Verb::Create, "compute") => (
            "gcloud",
            to_args(&[
                "compute",
                "instances",
                "create",
                name,
                "--zone",
                zone,
                "--machine-type",
                GCP_DEFAULT_MACHINE_TYPE,
            ]),
        ),
        (Verb::Create, "storage") => ("gsutil", to_args(&["mb", &bucket])),
        (Verb::Delete, "compute") => (
            "gcloud",
            to_args(&["compute", "instances", "delete", name, "--zone", zone, "--quiet"]),
        ),
        (Verb::Delete, "storage") => ("gsutil", to_args(&["rm", "-r", &bucket])),
        (Verb::List, "compute") => ("gcloud", to_args(&["compute", "instances", "list"])),
        (Verb::List, "storage") => ("gsutil", to_args(&["ls"])),
        (Verb::List, "sql") => ("gcloud", to_args(&["sql", "instances", "list"])),
        _ => return Err(unsupported(provider, verb, &resource)),
    };
    require_name(provider, verb, &resource)?;

    let mut plan = CommandPlan::new(program, args);
    // gsutil takes the project from the boto config, not a flag.
    if program == "gcloud" {
        if let Some(project) = &options.project {
            plan = plan.with_leading_args(["--project", project.as_str()]);
        }
    }
    Ok(plan)
}
