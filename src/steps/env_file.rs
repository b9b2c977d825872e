//! Environment file writing.
//!
//! The `.env` file is the only secret-bearing artifact the installer
//! produces. Its permission mode is the only thing keeping it private.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// File name written inside the target directory.
pub const ENV_FILE_NAME: &str = ".env";

/// Owner read/write only.
#[cfg(unix)]
const ENV_FILE_MODE: u32 = 0o600;

/// Path of the environment file for `target_dir`.
pub fn env_path(target_dir: impl AsRef<Path>) -> PathBuf {
    target_dir.as_ref().join(ENV_FILE_NAME)
}

/// Write `payload` verbatim to `{target_dir}/.env`.
///
/// Any existing file is truncated without backup. On Unix the file ends up
/// with mode `0600` even if it existed before with wider permissions.
pub fn write_env(payload: &str, target_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let path = env_path(target_dir);

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(ENV_FILE_MODE);
    }

    let mut file = options.open(&path)?;
    restrict_permissions(&path)?;
    file.write_all(payload.as_bytes())?;
    file.flush()?;

    tracing::debug!("Wrote {} bytes to {}", payload.len(), path.display());
    Ok(path)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(ENV_FILE_MODE))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_payload_bytes_verbatim() {
        let temp = TempDir::new().unwrap();
        let payload = "DB_URL=postgres://u:p@db/kw\nEMPTY=\n# comment\r\nTRAILING=x ";

        let path = write_env(payload, temp.path()).unwrap();

        assert_eq!(path, temp.path().join(".env"));
        assert_eq!(fs::read(&path).unwrap(), payload.as_bytes());
    }

    #[test]
    fn overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env"), "OLD=1\nLONGER_THAN_NEW=1\n").unwrap();

        write_env("NEW=2\n", temp.path()).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join(".env")).unwrap(),
            "NEW=2\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn new_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = write_env("A=1\n", temp.path()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn existing_world_readable_file_is_restricted() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        fs::write(&path, "A=1\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_env("B=2\n", temp.path()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = write_env("A=1", temp.path().join("does-not-exist"));
        assert!(result.is_err());
    }
}
