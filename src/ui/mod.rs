//! User-facing output and input.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive line-mode prompts
//! - [`NonInteractiveUI`] for piped stdin
//! - [`MockUI`] for tests
//! - [`form`], the full-screen form front-end
//!
//! # Example
//!
//! ```
//! use knowwhere_installer::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_header("KnowWhere Installer");
//! ui.success("License OK.");
//! assert!(ui.has_success("License OK."));
//! ```

pub mod form;
pub mod mock;
pub mod non_interactive;
pub mod prompts;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use prompts::prompt_user;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, InstallerTheme};

use crate::error::Result;
use crate::workflow::Progress;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;

    /// Display one workflow progress event at its level.
    fn report(&mut self, progress: &Progress) {
        match progress {
            Progress::Info(msg) => self.message(msg),
            Progress::Success(msg) => self.success(msg),
            Progress::Warning(msg) => self.warning(msg),
        }
    }
}

/// A prompt to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for lookup in tests).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// The type of prompt.
    pub prompt_type: PromptType,
}

/// The type of prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptType {
    /// Free-form text input.
    Input,
    /// Text input that is not echoed.
    Secret,
}

/// Result of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// Text as entered.
    String(String),
    /// Input ended before an answer was given.
    Closed,
}

impl PromptResult {
    /// The entered text; a closed input reads as blank.
    pub fn as_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Closed => String::new(),
        }
    }
}
