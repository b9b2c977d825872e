//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use knowwhere_installer::ui::{MockUI, Prompt, PromptType, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("api_key", "abc");
//!
//! let answer = ui
//!     .prompt(&Prompt {
//!         key: "api_key".to_string(),
//!         question: "Enter your API key (license)".to_string(),
//!         prompt_type: PromptType::Secret,
//!     })
//!     .unwrap();
//!
//! assert_eq!(answer.as_string(), "abc");
//! assert_eq!(ui.secret_prompts(), ["api_key"]);
//! ```

use std::collections::HashMap;

use crate::error::Result;

use super::{Prompt, PromptResult, PromptType, UserInterface};

/// Mock UI implementation for testing.
///
/// Captures all UI interactions. Prompts without a configured response
/// answer with a blank string.
#[derive(Debug, Default)]
pub struct MockUI {
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    prompt_responses: HashMap<String, String>,
    prompts_shown: Vec<String>,
    secret_prompts: Vec<String>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Keys of every prompt shown, in order.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Keys of prompts that asked for secret input.
    pub fn secret_prompts(&self) -> &[String] {
        &self.secret_prompts
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m == msg)
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m == msg)
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m == msg)
    }

    /// Whether any captured error contains `fragment`.
    pub fn has_error_containing(&self, fragment: &str) -> bool {
        self.errors.iter().any(|m| m.contains(fragment))
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());
        if prompt.prompt_type == PromptType::Secret {
            self.secret_prompts.push(prompt.key.clone());
        }

        let response = self
            .prompt_responses
            .get(&prompt.key)
            .cloned()
            .unwrap_or_default();
        Ok(PromptResult::String(response))
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}
