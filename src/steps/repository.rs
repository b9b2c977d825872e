//! Repository provisioning.

use std::path::Path;

use crate::error::Result;
use crate::shell::{CommandRunner, CommandSpec};
use crate::workflow::Progress;

/// What [`ensure_cloned`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneOutcome {
    /// The repository was cloned into the target directory.
    Cloned,
    /// The target path already existed; nothing was run.
    Skipped,
}

/// The clone command for `repo_url` into `target_dir`.
pub fn clone_command(repo_url: &str, target_dir: &str) -> CommandSpec {
    CommandSpec::new("git", ["clone", repo_url, target_dir])
}

/// Clone `repo_url` into `target_dir` unless that path already exists.
///
/// An existing path is never inspected: whatever it contains, cloning is
/// skipped. A failed clone is not cleaned up.
pub fn ensure_cloned(
    runner: &dyn CommandRunner,
    repo_url: &str,
    target_dir: &str,
    on_progress: &mut dyn FnMut(Progress),
) -> Result<CloneOutcome> {
    if Path::new(target_dir).exists() {
        on_progress(Progress::info(format!(
            "Directory {} exists; skipping clone.",
            target_dir
        )));
        return Ok(CloneOutcome::Skipped);
    }

    on_progress(Progress::info(format!("Cloning repo to {}...", target_dir)));
    let spec = clone_command(repo_url, target_dir);
    let status = runner.run(&spec)?;
    if !status.success() {
        return Err(spec.failed(&status));
    }

    tracing::info!("Cloned {} into {}", repo_url, target_dir);
    Ok(CloneOutcome::Cloned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InstallerError;
    use crate::shell::RecordingRunner;
    use tempfile::TempDir;

    fn path_str(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    fn clone(runner: &RecordingRunner, repo_url: &str, target: &str) -> Result<CloneOutcome> {
        ensure_cloned(runner, repo_url, target, &mut |_| {})
    }

    #[test]
    fn clones_when_target_missing() {
        let temp = TempDir::new().unwrap();
        let target = path_str(&temp.path().join("knowwhere"));
        let runner = RecordingRunner::new();

        let outcome = clone(&runner, "https://example.com/app.git", &target).unwrap();

        assert_eq!(outcome, CloneOutcome::Cloned);
        assert_eq!(
            runner.command_lines(),
            vec![format!("git clone https://example.com/app.git {}", target)]
        );
    }

    #[test]
    fn skips_existing_empty_directory() {
        let temp = TempDir::new().unwrap();
        let runner = RecordingRunner::new();

        let outcome =
            clone(&runner, "https://example.com/app.git", &path_str(temp.path())).unwrap();

        assert_eq!(outcome, CloneOutcome::Skipped);
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn skips_existing_unrelated_content() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("notes.txt"), "not a repo").unwrap();
        let runner = RecordingRunner::new();

        clone(&runner, "https://example.com/app.git", &path_str(temp.path())).unwrap();

        assert!(!runner.ran("git"));
    }

    #[test]
    fn skips_when_target_is_a_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("knowwhere");
        std::fs::write(&file, "").unwrap();
        let runner = RecordingRunner::new();

        let outcome = clone(&runner, "u", &path_str(&file)).unwrap();

        assert_eq!(outcome, CloneOutcome::Skipped);
    }

    #[test]
    fn nonzero_clone_exit_is_an_error() {
        let temp = TempDir::new().unwrap();
        let target = path_str(&temp.path().join("app"));
        let runner = RecordingRunner::new();
        runner.set_exit_code("git", 128);

        let err = clone(&runner, "https://example.com/app.git", &target).unwrap_err();

        assert!(matches!(
            err,
            InstallerError::CommandFailed { code: Some(128), .. }
        ));
    }

    #[test]
    fn missing_git_binary_is_an_error() {
        let temp = TempDir::new().unwrap();
        let target = path_str(&temp.path().join("app"));
        let runner = RecordingRunner::new();
        runner.set_unspawnable("git");

        assert!(clone(&runner, "u", &target).is_err());
    }

    #[test]
    fn reports_which_branch_was_taken() {
        let temp = TempDir::new().unwrap();
        let runner = RecordingRunner::new();
        let mut lines = Vec::new();

        ensure_cloned(&runner, "u", &path_str(temp.path()), &mut |p| {
            lines.push(p.to_string())
        })
        .unwrap();

        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("exists; skipping clone."));
    }
}
