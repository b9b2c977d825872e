//! Error types for installer operations.
//!
//! This module defines [`InstallerError`], the error type returned by every
//! provisioning step, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Each main step returns `InstallerError` and the workflow wraps it in
//!   [`InstallerError::Stage`] so the message names the step that failed
//! - Prerequisite installation never produces an error; failures are logged
//! - Use `anyhow::Error` (via `InstallerError::Other`) for unexpected errors

use std::fmt;

use thiserror::Error;

/// A main step of the provisioning sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ValidateLicense,
    FetchConfig,
    CloneRepository,
    WriteEnv,
    LaunchServices,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self {
            Stage::ValidateLicense => "License validation failed",
            Stage::FetchConfig => "Failed to fetch config",
            Stage::CloneRepository => "git clone failed",
            Stage::WriteEnv => "Failed to write .env",
            Stage::LaunchServices => "docker compose failed",
        };
        f.write_str(prefix)
    }
}

/// Core error type for installer operations.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The license key was left blank.
    #[error("API key required.")]
    MissingApiKey,

    /// The HTTP request never produced a response.
    #[error("request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    /// The response arrived but could not be interpreted.
    #[error("bad response: {message}")]
    BadResponse { message: String },

    /// The license service answered with `ok: false`.
    #[error("license not valid: {reason}")]
    LicenseNotValid { reason: String },

    /// External command could not be spawned or exited non-zero.
    #[error("command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A provisioning step failed; the run stops here.
    #[error("{stage}: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<InstallerError>,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InstallerError {
    /// Attribute this error to a provisioning step.
    pub fn at(self, stage: Stage) -> Self {
        InstallerError::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// The step this error was attributed to, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            InstallerError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, InstallerError>;
