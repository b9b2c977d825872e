//! Platform and package manager detection.

use std::fmt;

use crate::shell::CommandRunner;

/// Operating system family, as far as prerequisite installation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    /// Anything without an auto-install route (macOS, BSDs, ...).
    Other,
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }
}

/// Native Linux package managers, in probe priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    AptGet,
    Dnf,
    Yum,
}

/// Package managers sharing package names and index-refresh verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerFamily {
    Debian,
    RedHat,
}

impl PackageManager {
    /// Probe order: the first one found on PATH wins.
    pub const PROBE_ORDER: [PackageManager; 4] = [
        PackageManager::Apt,
        PackageManager::AptGet,
        PackageManager::Dnf,
        PackageManager::Yum,
    ];

    /// Executable name.
    pub fn binary(self) -> &'static str {
        match self {
            PackageManager::Apt => "apt",
            PackageManager::AptGet => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Yum => "yum",
        }
    }

    pub fn family(self) -> ManagerFamily {
        match self {
            PackageManager::Apt | PackageManager::AptGet => ManagerFamily::Debian,
            PackageManager::Dnf | PackageManager::Yum => ManagerFamily::RedHat,
        }
    }

    /// Find the highest-priority package manager on PATH.
    pub fn detect(runner: &dyn CommandRunner) -> Option<Self> {
        Self::PROBE_ORDER
            .into_iter()
            .find(|pm| runner.has_command(pm.binary()))
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}
