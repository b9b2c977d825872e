//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]. Both commands end in the same
//! [`Installer::run`](crate::workflow::Installer::run).

pub mod dispatcher;
pub mod form;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
