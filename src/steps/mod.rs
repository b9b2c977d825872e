//! Filesystem and process steps of the provisioning sequence.
//!
//! - [`repository`] - Clone the application repository unless the target exists
//! - [`env_file`] - Write the configuration payload to `{target}/.env`
//! - [`launch`] - Bring services up with `docker compose up -d`

pub mod env_file;
pub mod launch;
pub mod repository;

pub use env_file::{env_path, write_env, ENV_FILE_NAME};
pub use launch::{bring_up, compose_up_command, verify_hint, SERVICE_PORTS};
pub use repository::{clone_command, ensure_cloned, CloneOutcome};
