use serde::Serialize;
use std::fmt;

use crate::common::shell::join_command;

/// The literal external command a translator would run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandPlan {
    pub program: String,
    pub args: Vec<String>,
    /// Caveats the caller must see, e.g. an emulated verb.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl CommandPlan {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Insert global flags right after the program name
    /// (`aws --profile ops ec2 ...`).
    pub fn with_leading_args<I, S>(mut self, leading: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args: Vec<String> = leading.into_iter().map(Into::into).collect();
        args.append(&mut self.args);
        self.args = args;
        self
    }

    pub fn command_line(&self) -> String {
        join_command(&self.program, &self.args)
    }
}

impl fmt::Display for CommandPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}
