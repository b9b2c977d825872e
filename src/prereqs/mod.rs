//! Prerequisite resolution.
//!
//! Makes a best effort to get a container runtime, the compose plugin and
//! git onto the machine before services are launched. Nothing in here can
//! fail the run: missing installers are skipped, failing installs are
//! logged, and nothing is re-checked afterwards.
//!
//! # Modules
//!
//! - [`platform`] - Platform and package manager detection
//! - [`plan`] - Install plans as data tables

pub mod plan;
pub mod platform;

pub use plan::{plan_for, Condition, InstallAction, InstallPlan};
pub use platform::{ManagerFamily, PackageManager, Platform};

use crate::shell::CommandRunner;
use crate::workflow::Progress;

/// Tally of what [`resolve`] did, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrereqReport {
    /// Actions whose command exited 0.
    pub installed: usize,
    /// Actions whose guard said they were not needed.
    pub not_needed: usize,
    /// Actions skipped because their installer program is missing.
    pub skipped: usize,
    /// Actions that could not be spawned or exited non-zero.
    pub failed: usize,
}

/// Build the plan for this machine.
///
/// Package managers are only probed on Linux.
pub fn detect_plan(runner: &dyn CommandRunner, platform: Platform) -> InstallPlan {
    let manager = match platform {
        Platform::Linux => PackageManager::detect(runner),
        Platform::Windows | Platform::Other => None,
    };
    if let Some(pm) = manager {
        tracing::debug!("Detected package manager: {}", pm);
    }
    plan_for(platform, manager)
}

/// Detect, plan and run prerequisite installation for `platform`.
pub fn resolve(
    runner: &dyn CommandRunner,
    platform: Platform,
    on_progress: &mut dyn FnMut(Progress),
) -> PrereqReport {
    let plan = detect_plan(runner, platform);
    execute_plan(runner, &plan, on_progress)
}

/// Run every action of `plan` in order, best effort.
pub fn execute_plan(
    runner: &dyn CommandRunner,
    plan: &InstallPlan,
    on_progress: &mut dyn FnMut(Progress),
) -> PrereqReport {
    let mut report = PrereqReport::default();

    if let Some(intro) = plan.intro {
        on_progress(Progress::info(intro));
    }
    if let Some(advice) = plan.advisory {
        on_progress(Progress::warning(advice));
    }

    for action in &plan.actions {
        if !action.when.holds(runner) {
            tracing::debug!("{} not needed ({:?})", action.label, action.when);
            report.not_needed += 1;
            continue;
        }

        let program = &action.command.program;
        if !runner.has_command(program) {
            on_progress(Progress::warning(format!(
                "Missing {}, skipping auto-install",
                program
            )));
            report.skipped += 1;
            continue;
        }

        on_progress(Progress::info(format!("Installing {}...", action.label)));
        match runner.run(&action.command) {
            Ok(status) if status.success() => report.installed += 1,
            Ok(status) => {
                tracing::warn!(
                    "`{}` exited with {:?}; continuing",
                    action.command,
                    status.exit_code
                );
                report.failed += 1;
            }
            Err(e) => {
                tracing::warn!("`{}` could not run: {}; continuing", action.command, e);
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        "Prerequisites: {} installed, {} not needed, {} skipped, {} failed",
        report.installed,
        report.not_needed,
        report.skipped,
        report.failed
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::RecordingRunner;

    fn run(runner: &RecordingRunner, platform: Platform) -> (PrereqReport, Vec<Progress>) {
        let mut events = Vec::new();
        let report = resolve(runner, platform, &mut |p| events.push(p));
        (report, events)
    }

    #[test]
    fn fresh_debian_box_installs_everything() {
        let runner = RecordingRunner::new().with_commands(["apt", "sudo", "systemctl"]);

        let (report, _) = run(&runner, Platform::Linux);

        assert_eq!(
            runner.command_lines(),
            vec![
                "sudo apt update",
                "sudo apt install -y docker.io",
                "sudo apt install -y docker-compose-plugin",
                "sudo apt install -y git",
                "sudo systemctl enable --now docker",
            ]
        );
        assert_eq!(report.installed, 5);
    }

    #[test]
    fn present_tools_are_not_reinstalled_but_compose_plugin_is() {
        let runner =
            RecordingRunner::new().with_commands(["dnf", "sudo", "docker", "git"]);

        let (report, _) = run(&runner, Platform::Linux);

        assert_eq!(
            runner.command_lines(),
            vec!["sudo dnf makecache", "sudo dnf install -y docker-compose-plugin"]
        );
        assert_eq!(report.not_needed, 3);
    }

    #[test]
    fn missing_sudo_skips_every_action_with_a_message() {
        let runner = RecordingRunner::new().with_commands(["apt"]);

        let (report, events) = run(&runner, Platform::Linux);

        assert!(runner.invocations().is_empty());
        assert_eq!(report.skipped, 4);
        assert!(events
            .iter()
            .any(|e| e.text() == "Missing sudo, skipping auto-install"));
    }

    #[test]
    fn install_failures_are_swallowed() {
        let runner = RecordingRunner::new().with_commands(["apt-get", "sudo"]);
        runner.set_exit_code("sudo", 100);

        let (report, _) = run(&runner, Platform::Linux);

        assert_eq!(report.failed, 4);
        assert_eq!(runner.invocations().len(), 4);
    }

    #[test]
    fn spawn_failures_are_swallowed() {
        let runner = RecordingRunner::new().with_commands(["winget"]);
        runner.set_unspawnable("winget");

        let (report, _) = run(&runner, Platform::Windows);

        assert_eq!(report.failed, 2);
    }

    #[test]
    fn windows_only_installs_missing_tools() {
        let runner = RecordingRunner::new().with_commands(["winget", "git"]);

        run(&runner, Platform::Windows);

        assert_eq!(
            runner.command_lines(),
            vec!["winget install --id=Docker.DockerDesktop -e --accept-source-agreements --accept-package-agreements"]
        );
    }

    #[test]
    fn windows_does_not_probe_linux_managers() {
        let runner = RecordingRunner::new().with_commands(["docker", "git"]);

        run(&runner, Platform::Windows);

        assert!(!runner.lookups().iter().any(|l| l == "apt"));
    }

    #[test]
    fn linux_without_manager_only_advises() {
        let runner = RecordingRunner::new().with_commands(["sudo"]);

        let (report, events) = run(&runner, Platform::Linux);

        assert!(runner.invocations().is_empty());
        assert_eq!(report, PrereqReport::default());
        assert!(events.iter().any(|e| e.text().starts_with("No supported package manager")));
    }

    #[test]
    fn other_platform_only_advises() {
        let runner = RecordingRunner::new();

        let (_, events) = run(&runner, Platform::Other);

        assert!(runner.invocations().is_empty());
        assert!(runner.lookups().is_empty());
        assert_eq!(events.len(), 1);
        assert!(events[0].text().contains("Auto-install not implemented"));
    }
}
