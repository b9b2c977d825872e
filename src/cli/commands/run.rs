//! Line-mode provisioning.

use crate::error::Result;
use crate::params;
use crate::shell::SystemRunner;
use crate::ui::UserInterface;
use crate::workflow::{Installer, RunOutcome, WorkflowOptions};

use super::dispatcher::{Command, CommandResult};

/// Prompts for the run parameters, then runs the workflow synchronously.
///
/// Child processes share the terminal.
pub struct RunCommand {
    options: WorkflowOptions,
}

impl RunCommand {
    pub fn new(options: WorkflowOptions) -> Self {
        Self { options }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let runner = SystemRunner::new();
        run_with(ui, &Installer::new(&runner, self.options.clone()))
    }
}

/// Collect parameters through `ui` and run `installer`.
fn run_with(ui: &mut dyn UserInterface, installer: &Installer<'_>) -> Result<CommandResult> {
    ui.show_header("KnowWhere Installer");

    let params = match params::collect(ui) {
        Ok(params) => params,
        Err(e) => {
            ui.error(&e.to_string());
            return Ok(CommandResult::failure(1));
        }
    };

    match installer.run(&params, &mut |progress| ui.report(&progress)) {
        Ok(RunOutcome::Completed { env_path }) => {
            tracing::info!("Provisioned {}", env_path.display());
            Ok(CommandResult::success())
        }
        Ok(RunOutcome::NoConfig) => Ok(CommandResult::success()),
        Err(e) => {
            ui.error(&e.to_string());
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::keys;
    use crate::prereqs::Platform;
    use crate::shell::RecordingRunner;
    use crate::ui::MockUI;
    use httpmock::prelude::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn options() -> WorkflowOptions {
        WorkflowOptions {
            platform: Platform::Other,
            settle_delay: Duration::ZERO,
            attempts: 1,
        }
    }

    fn answer(ui: &mut MockUI, server: &MockServer, target: &std::path::Path) {
        ui.set_prompt_response(keys::API_BASE, &server.base_url());
        ui.set_prompt_response(keys::API_KEY, "abc");
        ui.set_prompt_response(keys::TARGET_DIR, &target.to_string_lossy());
    }

    #[test]
    fn blank_key_fails_without_running_anything() {
        let runner = RecordingRunner::new();
        let mut ui = MockUI::new();

        let result = run_with(&mut ui, &Installer::new(&runner, options())).unwrap();

        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.errors(), ["API key required."]);
        assert!(runner.lookups().is_empty());
    }

    #[test]
    fn no_config_is_a_clean_exit() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/license/validate");
            then.status(200).body(r#"{"ok":true}"#);
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/config/by-key");
            then.status(404);
        });
        let temp = TempDir::new().unwrap();
        let runner = RecordingRunner::new();
        let mut ui = MockUI::new();
        answer(&mut ui, &server, &temp.path().join("kw"));

        let result = run_with(&mut ui, &Installer::new(&runner, options())).unwrap();

        assert_eq!(result, CommandResult::success());
        assert!(ui.has_success("License OK."));
        assert!(ui.has_warning(
            "No config stored for this key. Please save .env via the web UI first."
        ));
        assert!(ui.errors().is_empty());
    }

    #[test]
    fn completed_run_reports_each_step() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/license/validate");
            then.status(200).body(r#"{"ok":true}"#);
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/config/by-key");
            then.status(200).body(r#"{"config":"A=1\n"}"#);
        });
        let temp = TempDir::new().unwrap();
        let runner = RecordingRunner::new();
        let mut ui = MockUI::new();
        answer(&mut ui, &server, temp.path());

        let result = run_with(&mut ui, &Installer::new(&runner, options())).unwrap();

        let skipped = format!("Directory {} exists; skipping clone.", temp.path().display());
        assert_eq!(result, CommandResult::success());
        assert_eq!(
            ui.messages(),
            [
                "Validating license...",
                "Fetching encrypted config from server...",
                skipped.as_str(),
                "Checking prerequisites...",
                "Prereq check completed.",
                "Starting containers with docker compose up -d ...",
                "Waiting for services to settle...",
            ]
        );
        assert!(ui.has_success(
            "Installer complete. Verify services at API 3000, embedding 8081, reranker 8082."
        ));
    }

    #[test]
    fn workflow_error_exits_one() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/license/validate");
            then.status(403).body(r#"{"ok":false,"reason":"inactive"}"#);
        });
        let temp = TempDir::new().unwrap();
        let runner = RecordingRunner::new();
        let mut ui = MockUI::new();
        answer(&mut ui, &server, temp.path());

        let result = run_with(&mut ui, &Installer::new(&runner, options())).unwrap();

        assert_eq!(result.exit_code, 1);
        assert_eq!(
            ui.errors(),
            ["License validation failed: license not valid: inactive"]
        );
    }
}
