//! KnowWhere Installer - license-gated provisioning for the KnowWhere stack.
//!
//! A run validates a license key against the hosted service, downloads the
//! stored `.env` payload, clones the application repository, installs
//! container tooling where it can, and starts the services with
//! `docker compose`.
//!
//! # Modules
//!
//! - [`api`] - License validation and config fetch over HTTP
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`params`] - Run parameters and their defaults
//! - [`prereqs`] - Best-effort prerequisite installation
//! - [`shell`] - External process execution and PATH lookup
//! - [`steps`] - Clone, `.env` and launch steps
//! - [`ui`] - Line-mode prompts, terminal output and the form
//! - [`workflow`] - The provisioning sequence shared by both front-ends
//!
//! # Example
//!
//! ```
//! use knowwhere_installer::params::{RawInput, RunParameters, DEFAULT_TARGET_DIR};
//!
//! let params = RunParameters::resolve(&RawInput {
//!     api_key: " my-key ".into(),
//!     ..Default::default()
//! })
//! .unwrap();
//! assert_eq!(params.api_key, "my-key");
//! assert_eq!(params.target_dir, DEFAULT_TARGET_DIR);
//! ```

pub mod api;
pub mod cli;
pub mod error;
pub mod params;
pub mod prereqs;
pub mod shell;
pub mod steps;
pub mod ui;
pub mod workflow;

pub use error::{InstallerError, Result};
