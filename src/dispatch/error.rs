use thiserror::Error;

use super::verb::{ProviderCategory, Verb};
use crate::providers::TranslateError;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("invalid target '{0}': names may only contain letters, digits, '_' and '-' (optionally as 'type/name')")]
    UnrecognizedTarget(String),

    #[error("unknown verb '{0}'")]
    UnknownVerb(String),

    #[error("'{verb}' is not a valid action for {category} providers")]
    VerbNotValidForCategory {
        verb: Verb,
        category: ProviderCategory,
    },

    #[error("no service manager is available for {0}")]
    NoServiceManager(String),

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error("'{command}' could not be started: {reason}")]
    ToolUnavailable { command: String, reason: String },

    #[error("'{command}' failed{}", exit_suffix(.exit_code))]
    ToolFailed {
        command: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("no managed software found")]
    NoManagedSoftware,
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {code}"),
        None => " (terminated by signal)".to_string(),
    }
}

impl DispatchError {
    /// Short dotted code used when the error is emitted.
    pub fn code(&self) -> &'static str {
        match self {
            DispatchError::UnrecognizedTarget(_) => "dispatch.invalid_target",
            DispatchError::UnknownVerb(_) => "dispatch.unknown_verb",
            DispatchError::VerbNotValidForCategory { .. } => "dispatch.invalid_verb",
            DispatchError::NoServiceManager(_) => "dispatch.no_service_manager",
            DispatchError::Translate(e) => e.code(),
            DispatchError::ToolUnavailable { .. } => "dispatch.tool_unavailable",
            DispatchError::ToolFailed { .. } => "dispatch.tool_failed",
            DispatchError::NoManagedSoftware => "dispatch.no_managed_software",
        }
    }
}
