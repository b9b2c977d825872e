//! Install plans as data.
//!
//! A plan is an ordered list of guarded commands chosen by platform and,
//! on Linux, by the detected package manager. Adding a platform or a
//! package means adding a table row, not a branch.

use crate::shell::{CommandRunner, CommandSpec};

use super::platform::{ManagerFamily, PackageManager, Platform};

/// Guard evaluated right before an action would run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    /// Run only if this tool is not on PATH.
    Missing(&'static str),
    /// Run only if this tool is on PATH.
    Present(&'static str),
}

impl Condition {
    /// Evaluate the guard against the current PATH.
    pub fn holds(self, runner: &dyn CommandRunner) -> bool {
        match self {
            Condition::Always => true,
            Condition::Missing(tool) => !runner.has_command(tool),
            Condition::Present(tool) => runner.has_command(tool),
        }
    }
}

/// One guarded install command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallAction {
    /// What the action provides, for progress output.
    pub label: &'static str,
    pub when: Condition,
    pub command: CommandSpec,
}

/// Everything the resolver will attempt on this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    /// Printed before anything runs.
    pub intro: Option<&'static str>,
    pub actions: Vec<InstallAction>,
    /// Printed when no automatic route exists.
    pub advisory: Option<&'static str>,
}

impl InstallPlan {
    fn advisory_only(message: &'static str) -> Self {
        Self {
            intro: None,
            actions: Vec::new(),
            advisory: Some(message),
        }
    }
}

const WINDOWS_INTRO: &str =
    "Checking/installing prerequisites via winget (Docker Desktop, Git).";
const LINUX_INTRO: &str =
    "Checking/installing prerequisites via package manager (Docker, Compose plugin, Git).";
const NO_MANAGER_ADVICE: &str =
    "No supported package manager (apt/dnf/yum) found. Please install Docker/Compose and Git manually.";
const UNSUPPORTED_OS_ADVICE: &str =
    "Please ensure Docker/Compose and Git are installed. (Auto-install not implemented on this OS.)";

/// A winget package installed when its tool is missing.
struct WingetRow {
    label: &'static str,
    tool: &'static str,
    id: &'static str,
}

const WINDOWS_PACKAGES: &[WingetRow] = &[
    WingetRow {
        label: "container runtime",
        tool: "docker",
        id: "Docker.DockerDesktop",
    },
    WingetRow {
        label: "version-control client",
        tool: "git",
        id: "Git.Git",
    },
];

/// A native package, named per manager family.
struct PackageRow {
    label: &'static str,
    when: Condition,
    debian: &'static str,
    redhat: &'static str,
}

const LINUX_PACKAGES: &[PackageRow] = &[
    PackageRow {
        label: "container runtime",
        when: Condition::Missing("docker"),
        debian: "docker.io",
        redhat: "docker",
    },
    PackageRow {
        label: "compose plugin",
        when: Condition::Always,
        debian: "docker-compose-plugin",
        redhat: "docker-compose-plugin",
    },
    PackageRow {
        label: "version-control client",
        when: Condition::Missing("git"),
        debian: "git",
        redhat: "git",
    },
];

impl ManagerFamily {
    /// Subcommand that refreshes the package index.
    fn refresh_verb(self) -> &'static str {
        match self {
            ManagerFamily::Debian => "update",
            ManagerFamily::RedHat => "makecache",
        }
    }

    fn package<'a>(self, row: &'a PackageRow) -> &'a str {
        match self {
            ManagerFamily::Debian => row.debian,
            ManagerFamily::RedHat => row.redhat,
        }
    }
}

fn sudo(args: &[&str]) -> CommandSpec {
    CommandSpec::new("sudo", args.iter().copied())
}

fn windows_plan() -> InstallPlan {
    let actions = WINDOWS_PACKAGES
        .iter()
        .map(|row| InstallAction {
            label: row.label,
            when: Condition::Missing(row.tool),
            command: CommandSpec::new(
                "winget",
                [
                    "install".to_string(),
                    format!("--id={}", row.id),
                    "-e".to_string(),
                    "--accept-source-agreements".to_string(),
                    "--accept-package-agreements".to_string(),
                ],
            ),
        })
        .collect();

    InstallPlan {
        intro: Some(WINDOWS_INTRO),
        actions,
        advisory: None,
    }
}

fn linux_plan(manager: PackageManager) -> InstallPlan {
    let pm = manager.binary();
    let family = manager.family();

    let mut actions = vec![InstallAction {
        label: "package index",
        when: Condition::Always,
        command: sudo(&[pm, family.refresh_verb()]),
    }];

    actions.extend(LINUX_PACKAGES.iter().map(|row| InstallAction {
        label: row.label,
        when: row.when,
        command: sudo(&[pm, "install", "-y", family.package(row)]),
    }));

    actions.push(InstallAction {
        label: "container runtime service",
        when: Condition::Present("systemctl"),
        command: sudo(&["systemctl", "enable", "--now", "docker"]),
    });

    InstallPlan {
        intro: Some(LINUX_INTRO),
        actions,
        advisory: None,
    }
}

/// Build the plan for `platform` with the detected package manager.
pub fn plan_for(platform: Platform, manager: Option<PackageManager>) -> InstallPlan {
    match (platform, manager) {
        (Platform::Windows, _) => windows_plan(),
        (Platform::Linux, Some(manager)) => linux_plan(manager),
        (Platform::Linux, None) => InstallPlan {
            intro: Some(LINUX_INTRO),
            actions: Vec::new(),
            advisory: Some(NO_MANAGER_ADVICE),
        },
        (Platform::Other, _) => InstallPlan::advisory_only(UNSUPPORTED_OS_ADVICE),
    }
}
