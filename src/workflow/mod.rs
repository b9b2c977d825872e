//! The provisioning sequence.
//!
//! [`Installer::run`] is the single entry point shared by the line-mode and
//! form front-ends. It reports through a progress callback and stops at the
//! first failing step.

pub mod installer;
pub mod progress;

pub use installer::{Installer, RunOutcome, WorkflowOptions, DEFAULT_SETTLE_DELAY};
pub use progress::Progress;
