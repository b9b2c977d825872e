//! Interactive prompts.

use console::Term;
use dialoguer::{Input, Password};

use crate::error::{InstallerError, Result};

use super::{Prompt, PromptResult, PromptType};

/// Convert dialoguer errors to InstallerError.
fn map_dialoguer_err(e: dialoguer::Error) -> InstallerError {
    InstallerError::Io(e.into())
}

/// Prompt the user for input.
///
/// Blank answers are accepted; defaulting happens later in one place.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match prompt.prompt_type {
        PromptType::Input => prompt_input(prompt, term),
        PromptType::Secret => prompt_secret(prompt, term),
    }
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let result: String = Input::new()
        .with_prompt(&prompt.question)
        .allow_empty(true)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::String(result))
}

fn prompt_secret(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let result = Password::new()
        .with_prompt(&prompt.question)
        .allow_empty_password(true)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::String(result))
}
