//! External process execution.

use std::fmt;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{InstallerError, Result};

/// A program invocation: executable, arguments, and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable name, resolved through PATH.
    pub program: String,
    /// Arguments passed verbatim (no shell interpretation).
    pub args: Vec<String>,
    /// Working directory (inherits the current one if unset).
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a spec for `program` with the given arguments.
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    /// Run the command inside `dir`.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Build the error for a failed run of this command.
    pub fn failed(&self, status: &CommandStatus) -> InstallerError {
        InstallerError::CommandFailed {
            command: self.to_string(),
            code: status.exit_code,
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Outcome of running a command to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStatus {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,
}

impl CommandStatus {
    /// A status with the given exit code.
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
        }
    }

    /// Whether the command exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Output line from command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

impl OutputLine {
    /// The text of the line without its stream tag.
    pub fn text(&self) -> &str {
        match self {
            OutputLine::Stdout(s) | OutputLine::Stderr(s) => s,
        }
    }
}

/// Receives streamed output lines from another thread.
pub type OutputSink = Arc<dyn Fn(OutputLine) + Send + Sync>;

/// What to do with a child's stdout and stderr.
#[derive(Clone, Default)]
pub enum OutputPolicy {
    /// Child writes straight to this process's terminal.
    #[default]
    Inherit,
    /// Child output is read line by line and handed to the sink.
    Stream(OutputSink),
}

impl fmt::Debug for OutputPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputPolicy::Inherit => f.write_str("Inherit"),
            OutputPolicy::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Runs external programs and answers PATH lookups.
///
/// The workflow only talks to processes through this trait so that tests
/// can substitute a recording double.
pub trait CommandRunner: Send + Sync {
    /// Check whether `program` is on the execution PATH.
    fn has_command(&self, program: &str) -> bool;

    /// Run a command to completion.
    ///
    /// Returns `Err` only when the process could not be spawned; a non-zero
    /// exit is reported through [`CommandStatus`].
    fn run(&self, spec: &CommandSpec) -> Result<CommandStatus>;
}

/// Production runner backed by `std::process`.
#[derive(Debug, Default)]
pub struct SystemRunner {
    output: OutputPolicy,
}

impl SystemRunner {
    /// Runner whose children share this process's terminal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that forwards every child output line to `sink`.
    pub fn streaming(sink: OutputSink) -> Self {
        Self {
            output: OutputPolicy::Stream(sink),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn has_command(&self, program: &str) -> bool {
        resolve_tool_path(program, &parse_system_path()).is_some()
    }

    fn run(&self, spec: &CommandSpec) -> Result<CommandStatus> {
        let start = Instant::now();
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!("Running `{}` (cwd: {:?})", spec, spec.cwd);

        let status = match &self.output {
            OutputPolicy::Inherit => {
                let status = cmd
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()?;
                CommandStatus {
                    exit_code: status.code(),
                }
            }
            OutputPolicy::Stream(sink) => run_streaming(cmd, sink)?,
        };

        tracing::debug!(
            "`{}` exited with {:?} after {}",
            spec,
            status.exit_code,
            format_elapsed(start.elapsed())
        );
        Ok(status)
    }
}

fn run_streaming(mut cmd: Command, sink: &OutputSink) -> Result<CommandStatus> {
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn()?;
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (tx, rx) = mpsc::channel();
    let tx_stderr = tx.clone();

    let stdout_handle = thread::spawn(move || {
        if let Some(stdout) = stdout {
            for line in BufReader::new(stdout).lines().map_while(std::result::Result::ok) {
                let _ = tx.send(OutputLine::Stdout(line));
            }
        }
    });

    let stderr_handle = thread::spawn(move || {
        if let Some(stderr) = stderr {
            for line in BufReader::new(stderr).lines().map_while(std::result::Result::ok) {
                let _ = tx_stderr.send(OutputLine::Stderr(line));
            }
        }
    });

    for line in rx {
        sink(line);
    }

    let _ = stdout_handle.join();
    let _ = stderr_handle.join();
    let status = child.wait()?;

    Ok(CommandStatus {
        exit_code: status.code(),
    })
}

fn format_elapsed(elapsed: Duration) -> String {
    if elapsed.as_secs() > 0 {
        format!("{:.1}s", elapsed.as_secs_f64())
    } else {
        format!("{}ms", elapsed.as_millis())
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// File names a bare tool name may resolve to on this platform.
fn candidate_names(tool: &str) -> Vec<String> {
    if cfg!(windows) && Path::new(tool).extension().is_none() {
        let exts = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".into());
        exts.split(';')
            .filter(|e| !e.is_empty())
            .map(|e| format!("{}{}", tool, e.to_lowercase()))
            .collect()
    } else {
        vec![tool.to_string()]
    }
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does not shell out
/// to `which`/`where`.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let names = candidate_names(tool);
    for dir in path_entries {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}
