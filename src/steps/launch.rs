//! Service launch.

use crate::error::Result;
use crate::shell::{CommandRunner, CommandSpec};

/// Ports the provisioned stack is expected to listen on.
pub const SERVICE_PORTS: [(&str, u16); 3] = [("API", 3000), ("embedding", 8081), ("reranker", 8082)];

/// `docker compose up -d` run inside `target_dir`.
pub fn compose_up_command(target_dir: &str) -> CommandSpec {
    CommandSpec::new("docker", ["compose", "up", "-d"]).in_dir(target_dir)
}

/// Start the stack in detached mode.
///
/// Output goes wherever the runner sends it; a non-zero exit is an error.
pub fn bring_up(runner: &dyn CommandRunner, target_dir: &str) -> Result<()> {
    let spec = compose_up_command(target_dir);
    let status = runner.run(&spec)?;
    if !status.success() {
        return Err(spec.failed(&status));
    }
    tracing::info!("Services started from {}", target_dir);
    Ok(())
}

/// Closing hint listing where to check each service.
pub fn verify_hint() -> String {
    let endpoints: Vec<String> = SERVICE_PORTS
        .iter()
        .map(|(name, port)| format!("{} {}", name, port))
        .collect();
    format!(
        "Installer complete. Verify services at {}.",
        endpoints.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InstallerError;
    use crate::shell::RecordingRunner;
    use std::path::PathBuf;

    #[test]
    fn runs_compose_up_in_target_dir() {
        let runner = RecordingRunner::new();

        bring_up(&runner, "knowwhere").unwrap();

        let calls = runner.invocations();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].to_string(), "docker compose up -d");
        assert_eq!(calls[0].cwd, Some(PathBuf::from("knowwhere")));
    }

    #[test]
    fn nonzero_exit_is_an_error() {
        let runner = RecordingRunner::new();
        runner.set_exit_code("docker", 1);

        let err = bring_up(&runner, "knowwhere").unwrap_err();

        assert!(matches!(err, InstallerError::CommandFailed { code: Some(1), .. }));
    }

    #[test]
    fn hint_names_all_three_ports() {
        assert_eq!(
            verify_hint(),
            "Installer complete. Verify services at API 3000, embedding 8081, reranker 8082."
        );
    }
}
