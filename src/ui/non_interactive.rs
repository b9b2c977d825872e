//! Line-based UI for piped stdin.

use std::io::{self, BufRead, Write};

use crate::error::Result;

use super::{InstallerTheme, Prompt, PromptResult, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Each prompt consumes one line from the input, without its line ending.
/// Once the input is exhausted every further prompt reads as blank.
pub struct NonInteractiveUI {
    input: Box<dyn BufRead>,
    theme: InstallerTheme,
}

impl NonInteractiveUI {
    /// Read answers from this process's stdin.
    pub fn new() -> Self {
        Self::from_reader(io::stdin().lock())
    }

    /// Read answers from `input` instead of stdin.
    pub fn from_reader(input: impl BufRead + 'static) -> Self {
        Self {
            input: Box::new(input),
            theme: InstallerTheme::plain(),
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

impl Default for NonInteractiveUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for NonInteractiveUI {
    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        print!("{}: ", prompt.question);
        io::stdout().flush().ok();

        let answer = match self.read_line()? {
            Some(line) => PromptResult::String(line),
            None => PromptResult::Closed,
        };
        // Piped answers are not echoed by a terminal.
        println!();
        Ok(answer)
    }

    fn show_header(&mut self, title: &str) {
        println!("{}", self.theme.format_header(title));
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
