//! Provisioning workflow.

use std::path::PathBuf;
use std::time::Duration;

use crate::api::{new_machine_id, ApiClient};
use crate::error::{Result, Stage};
use crate::params::RunParameters;
use crate::prereqs::{self, Platform};
use crate::shell::CommandRunner;
use crate::steps;

use super::Progress;

/// Fixed wait after `docker compose up -d` before reporting endpoints.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(5);

/// Knobs that stay fixed for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOptions {
    /// Platform used to pick the prerequisite plan.
    pub platform: Platform,
    /// Unconditional sleep after services start.
    pub settle_delay: Duration,
    /// Tries per HTTP request; transport failures only.
    pub attempts: u32,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            attempts: 1,
        }
    }
}

/// How a run ended when no step failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The service has no config for this key; nothing was touched on disk.
    NoConfig,
    /// Every step ran.
    Completed { env_path: PathBuf },
}

/// Runs the provisioning sequence against one command runner.
///
/// # Example
///
/// ```no_run
/// use knowwhere_installer::params::{RawInput, RunParameters};
/// use knowwhere_installer::shell::SystemRunner;
/// use knowwhere_installer::workflow::{Installer, WorkflowOptions};
///
/// let params = RunParameters::resolve(&RawInput {
///     api_key: "my-key".into(),
///     ..Default::default()
/// })
/// .unwrap();
///
/// let runner = SystemRunner::new();
/// let installer = Installer::new(&runner, WorkflowOptions::default());
/// installer.run(&params, &mut |line| println!("{}", line)).unwrap();
/// ```
pub struct Installer<'a> {
    runner: &'a dyn CommandRunner,
    options: WorkflowOptions,
}

impl<'a> Installer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, options: WorkflowOptions) -> Self {
        Self { runner, options }
    }

    /// Validate, fetch, clone, write `.env`, install prerequisites, launch.
    ///
    /// Steps run strictly in that order. The first error aborts the rest and
    /// is returned wrapped in [`InstallerError::Stage`](crate::error::InstallerError::Stage).
    /// Prerequisite installation never fails the run.
    pub fn run(
        &self,
        params: &RunParameters,
        on_progress: &mut dyn FnMut(Progress),
    ) -> Result<RunOutcome> {
        let _span = tracing::info_span!("provision", target = %params.target_dir).entered();
        let machine_id = new_machine_id();
        tracing::debug!("Machine id for this run: {}", machine_id);

        on_progress(Progress::info("Validating license..."));
        let client = ApiClient::new(&params.api_base)
            .map_err(|e| e.at(Stage::ValidateLicense))?
            .with_attempts(self.options.attempts);
        client
            .validate_license(&params.api_key, &machine_id)
            .map_err(|e| e.at(Stage::ValidateLicense))?;
        on_progress(Progress::success("License OK."));

        on_progress(Progress::info("Fetching encrypted config from server..."));
        let payload = client
            .fetch_config(&params.api_key)
            .map_err(|e| e.at(Stage::FetchConfig))?;
        let Some(payload) = payload else {
            on_progress(Progress::warning(
                "No config stored for this key. Please save .env via the web UI first.",
            ));
            return Ok(RunOutcome::NoConfig);
        };

        steps::ensure_cloned(
            self.runner,
            &params.repo_url,
            &params.target_dir,
            on_progress,
        )
        .map_err(|e| e.at(Stage::CloneRepository))?;

        let env_path =
            steps::write_env(&payload, &params.target_dir).map_err(|e| e.at(Stage::WriteEnv))?;
        on_progress(Progress::success(format!(
            ".env written to {}",
            env_path.display()
        )));

        on_progress(Progress::info("Checking prerequisites..."));
        prereqs::resolve(self.runner, self.options.platform, on_progress);
        on_progress(Progress::info("Prereq check completed."));

        on_progress(Progress::info(
            "Starting containers with docker compose up -d ...",
        ));
        steps::bring_up(self.runner, &params.target_dir)
            .map_err(|e| e.at(Stage::LaunchServices))?;

        on_progress(Progress::info("Waiting for services to settle..."));
        std::thread::sleep(self.options.settle_delay);
        on_progress(Progress::success(steps::verify_hint()));

        Ok(RunOutcome::Completed { env_path })
    }
}
