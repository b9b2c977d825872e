//! Recording command runner for testing.
//!
//! `RecordingRunner` implements [`CommandRunner`] without spawning anything.
//! It answers PATH lookups from a configured set of tool names and returns
//! configured exit codes, capturing every invocation for later assertion.
//!
//! # Example
//!
//! ```
//! use knowwhere_installer::shell::{CommandRunner, CommandSpec, RecordingRunner};
//!
//! let runner = RecordingRunner::new().with_commands(["git"]);
//! runner.set_exit_code("git", 128);
//!
//! assert!(runner.has_command("git"));
//! let status = runner.run(&CommandSpec::new("git", ["clone", "a", "b"])).unwrap();
//! assert!(!status.success());
//! assert_eq!(runner.command_lines(), vec!["git clone a b".to_string()]);
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use crate::error::{InstallerError, Result};

use super::{CommandRunner, CommandSpec, CommandStatus};

#[derive(Debug, Default)]
struct State {
    available: HashSet<String>,
    exit_codes: HashMap<String, i32>,
    unspawnable: HashSet<String>,
    invocations: Vec<CommandSpec>,
    lookups: Vec<String>,
}

/// Command runner double that records instead of executing.
///
/// Programs not given an exit code exit with 0.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    state: Mutex<State>,
}

impl RecordingRunner {
    /// Create a runner with nothing on PATH.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report these tools as present on PATH.
    pub fn with_commands<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock().available.extend(names.into_iter().map(Into::into));
        self
    }

    /// Make `program` exit with `code`.
    pub fn set_exit_code(&self, program: &str, code: i32) {
        self.lock().exit_codes.insert(program.to_string(), code);
    }

    /// Make spawning `program` fail as if the binary were missing.
    pub fn set_unspawnable(&self, program: &str) {
        self.lock().unspawnable.insert(program.to_string());
    }

    /// Every command run so far, in order.
    pub fn invocations(&self) -> Vec<CommandSpec> {
        self.lock().invocations.clone()
    }

    /// Every command run so far, rendered as `program arg arg`.
    pub fn command_lines(&self) -> Vec<String> {
        self.lock()
            .invocations
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Every PATH lookup so far, in order.
    pub fn lookups(&self) -> Vec<String> {
        self.lock().lookups.clone()
    }

    /// Check whether any invocation ran `program`.
    pub fn ran(&self, program: &str) -> bool {
        self.lock().invocations.iter().any(|s| s.program == program)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking test thread must not hide the recorded calls.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CommandRunner for RecordingRunner {
    fn has_command(&self, program: &str) -> bool {
        let mut state = self.lock();
        state.lookups.push(program.to_string());
        state.available.contains(program)
    }

    fn run(&self, spec: &CommandSpec) -> Result<CommandStatus> {
        let mut state = self.lock();
        state.invocations.push(spec.clone());
        if state.unspawnable.contains(&spec.program) {
            return Err(InstallerError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{}: not found", spec.program),
            )));
        }
        let code = state.exit_codes.get(&spec.program).copied().unwrap_or(0);
        Ok(CommandStatus::exited(code))
    }
}
