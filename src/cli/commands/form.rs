//! Form-mode provisioning.

use crate::error::Result;
use crate::ui::{form, UserInterface};
use crate::workflow::WorkflowOptions;

use super::dispatcher::{Command, CommandResult};

/// Shows the full-screen form until the user quits.
///
/// Run outcomes are shown inside the form, so quitting always exits 0.
pub struct FormCommand {
    options: WorkflowOptions,
}

impl FormCommand {
    pub fn new(options: WorkflowOptions) -> Self {
        Self { options }
    }
}

impl Command for FormCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match form::run(self.options.clone()) {
            Ok(()) => Ok(CommandResult::success()),
            Err(e) => {
                ui.error(&format!("Form could not start: {}", e));
                Ok(CommandResult::failure(1))
            }
        }
    }
}
