//! Process execution.

use duct::cmd;
use serde::Serialize;

use super::error::DispatchError;
use super::plan::CommandPlan;

/// Exit status and captured output of one external command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionOutput {
    pub exit_code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs a plan. Only ever called when the request is not a dry run.
pub trait CommandRunner {
    fn run(&self, plan: &CommandPlan) -> Result<ExecutionOutput, DispatchError>;
}

/// Runs plans with duct, capturing both streams. A non-zero exit is
/// returned as output, not as an error; the caller decides what it means.
#[derive(Debug, Default, Clone, Copy)]
pub struct DuctRunner;

impl CommandRunner for DuctRunner {
    fn run(&self, plan: &CommandPlan) -> Result<ExecutionOutput, DispatchError> {
        let unavailable = |reason: String| DispatchError::ToolUnavailable {
            command: plan.command_line(),
            reason,
        };

        which::which(&plan.program)
            .map_err(|_| unavailable(format!("{} is not installed or not on PATH", plan.program)))?;

        let output = cmd(plan.program.as_str(), &plan.args)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|e| unavailable(e.to_string()))?;

        Ok(ExecutionOutput {
            exit_code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
