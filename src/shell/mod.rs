//! External process execution and PATH lookup.
//!
//! Every program the installer starts (git, docker, package managers) goes
//! through the [`CommandRunner`] trait. [`SystemRunner`] is the real
//! implementation; [`RecordingRunner`] is a double for tests.

pub mod command;
pub mod mock;

pub use command::{
    is_executable, parse_system_path, resolve_tool_path, CommandRunner, CommandSpec,
    CommandStatus, OutputLine, OutputPolicy, OutputSink, SystemRunner,
};
pub use mock::RecordingRunner;
