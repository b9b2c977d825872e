//! Progress events emitted while provisioning.

use std::fmt;

/// One line of progress for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Info(String),
    Success(String),
    Warning(String),
}

impl Progress {
    pub fn info(msg: impl Into<String>) -> Self {
        Progress::Info(msg.into())
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Progress::Success(msg.into())
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Progress::Warning(msg.into())
    }

    /// The line of text, without level.
    pub fn text(&self) -> &str {
        match self {
            Progress::Info(s) | Progress::Success(s) | Progress::Warning(s) => s,
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
