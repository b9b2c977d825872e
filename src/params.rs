//! Run parameter collection and defaulting.
//!
//! Both front-ends gather four raw strings and hand them to
//! [`RunParameters::resolve`], which trims them and fills blanks with the
//! hosted defaults. The license key is the only field without a default.

use crate::error::{InstallerError, Result};
use crate::ui::{Prompt, PromptType, UserInterface};

/// Hosted license and config service.
pub const DEFAULT_API_BASE: &str = "https://knowwhere-web.vercel.app";

/// Public application repository.
pub const DEFAULT_REPO_URL: &str = "https://github.com/bpmiranda3099/knowwhere.git";

/// Directory the repository is cloned into, relative to the working directory.
pub const DEFAULT_TARGET_DIR: &str = "knowwhere";

/// Field values exactly as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    pub api_base: String,
    pub api_key: String,
    pub repo_url: String,
    pub target_dir: String,
}

/// Fully populated parameters for one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    pub api_base: String,
    pub api_key: String,
    pub repo_url: String,
    pub target_dir: String,
}

impl RunParameters {
    /// Trim every field and substitute defaults for blank ones.
    ///
    /// No URL or path validation happens here; malformed values fail later
    /// in the network or filesystem layer.
    pub fn resolve(raw: &RawInput) -> Result<Self> {
        let api_key = raw.api_key.trim();
        if api_key.is_empty() {
            return Err(InstallerError::MissingApiKey);
        }

        Ok(Self {
            api_base: or_default(&raw.api_base, DEFAULT_API_BASE),
            api_key: api_key.to_string(),
            repo_url: or_default(&raw.repo_url, DEFAULT_REPO_URL),
            target_dir: or_default(&raw.target_dir, DEFAULT_TARGET_DIR),
        })
    }
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Prompt keys, in the order they are asked.
pub mod keys {
    pub const API_BASE: &str = "api_base";
    pub const API_KEY: &str = "api_key";
    pub const REPO_URL: &str = "repo_url";
    pub const TARGET_DIR: &str = "target_dir";
}

fn text_prompt(key: &str, question: String) -> Prompt {
    Prompt {
        key: key.to_string(),
        question,
        prompt_type: PromptType::Input,
    }
}

/// Ask for the four run parameters through the UI.
///
/// A blank license key stops collection before the remaining prompts and
/// returns [`InstallerError::MissingApiKey`].
pub fn collect(ui: &mut dyn UserInterface) -> Result<RunParameters> {
    let mut raw = RawInput {
        api_base: ui
            .prompt(&text_prompt(
                keys::API_BASE,
                format!("API base (e.g., {})", DEFAULT_API_BASE),
            ))?
            .as_string(),
        ..RawInput::default()
    };

    raw.api_key = ui
        .prompt(&Prompt {
            key: keys::API_KEY.to_string(),
            question: "Enter your API key (license)".to_string(),
            prompt_type: PromptType::Secret,
        })?
        .as_string();
    if raw.api_key.trim().is_empty() {
        return Err(InstallerError::MissingApiKey);
    }

    raw.repo_url = ui
        .prompt(&text_prompt(
            keys::REPO_URL,
            format!("Git repo URL [{}]", DEFAULT_REPO_URL),
        ))?
        .as_string();
    raw.target_dir = ui
        .prompt(&text_prompt(
            keys::TARGET_DIR,
            format!("Clone directory [{}]", DEFAULT_TARGET_DIR),
        ))?
        .as_string();

    RunParameters::resolve(&raw)
}
