//! Form model, kept free of terminal I/O so it can be tested directly.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::Result;
use crate::params::{
    RawInput, RunParameters, DEFAULT_API_BASE, DEFAULT_REPO_URL, DEFAULT_TARGET_DIR,
};
use crate::workflow::{Progress, RunOutcome};

/// Terms shown by the notice overlay.
pub const NOTICE: &str = "MIT License. Use at your own risk. No liability for data loss or damage.\n\n\
Prereqs: Docker/Compose, Git. Windows: auto via winget; Linux: auto via apt/dnf/yum.\n\
API keys: master in saved config, user key for validation.";

/// Index of the submit button in the focus ring.
const SUBMIT: usize = 4;

/// One editable line of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    /// Rendered as `*` per character.
    pub masked: bool,
}

impl FormField {
    fn new(label: &'static str, value: &str, masked: bool) -> Self {
        Self {
            label,
            value: value.to_string(),
            masked,
        }
    }

    /// What the form shows for this field.
    pub fn display_value(&self) -> String {
        if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// Severity of a progress log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
    /// A line printed by a child process.
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: LogLevel,
    pub text: String,
}

/// Messages sent from the worker thread to the render loop.
#[derive(Debug)]
pub enum FormEvent {
    Progress(Progress),
    Output(String),
    Finished(Result<RunOutcome>),
}

/// What the render loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Quit,
}

/// Fields, focus, progress log and run flag.
#[derive(Debug, Clone)]
pub struct FormState {
    pub fields: [FormField; 4],
    /// 0..=3 are fields, 4 is the submit button.
    pub focus: usize,
    pub log: Vec<LogLine>,
    pub running: bool,
    pub show_notice: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// A form with the hosted defaults prefilled and an empty key.
    pub fn new() -> Self {
        Self {
            fields: [
                FormField::new("API base", DEFAULT_API_BASE, false),
                FormField::new("License/API key", "", true),
                FormField::new("Repo URL", DEFAULT_REPO_URL, false),
                FormField::new("Target directory", DEFAULT_TARGET_DIR, false),
            ],
            focus: 0,
            log: Vec::new(),
            running: false,
            show_notice: false,
        }
    }

    pub fn submit_focused(&self) -> bool {
        self.focus == SUBMIT
    }

    /// Current field values, untrimmed.
    pub fn raw_input(&self) -> RawInput {
        let [api_base, api_key, repo_url, target_dir] = &self.fields;
        RawInput {
            api_base: api_base.value.clone(),
            api_key: api_key.value.clone(),
            repo_url: repo_url.value.clone(),
            target_dir: target_dir.value.clone(),
        }
    }

    /// Resolve the fields and mark a run as started.
    ///
    /// Returns `None` with the error in the log when the key is blank; the
    /// previous log is kept so the message shows under it.
    pub fn submit(&mut self) -> Option<RunParameters> {
        match RunParameters::resolve(&self.raw_input()) {
            Ok(params) => {
                self.log.clear();
                self.running = true;
                Some(params)
            }
            Err(e) => {
                self.push_log(LogLevel::Error, e.to_string());
                None
            }
        }
    }

    pub fn push_log(&mut self, level: LogLevel, text: impl Into<String>) {
        self.log.push(LogLine {
            level,
            text: text.into(),
        });
    }

    /// Apply one message from the worker thread.
    pub fn apply(&mut self, event: FormEvent) {
        match event {
            FormEvent::Progress(progress) => {
                let level = match progress {
                    Progress::Info(_) => LogLevel::Info,
                    Progress::Success(_) => LogLevel::Success,
                    Progress::Warning(_) => LogLevel::Warning,
                };
                self.push_log(level, progress.text());
            }
            FormEvent::Output(line) => self.push_log(LogLevel::Output, line),
            FormEvent::Finished(result) => {
                self.running = false;
                if let Err(e) = result {
                    self.push_log(LogLevel::Error, e.to_string());
                }
            }
        }
    }

    /// Update the form for one key press.
    ///
    /// Submit and quit are ignored while a run is active, and so is editing.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if key.kind != KeyEventKind::Press {
            return FormAction::None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::F(1) => {
                self.show_notice = !self.show_notice;
                return FormAction::None;
            }
            _ if self.show_notice => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                    self.show_notice = false;
                }
                return FormAction::None;
            }
            _ => {}
        }

        let quit = key.code == KeyCode::Esc || (ctrl && key.code == KeyCode::Char('c'));
        if quit {
            return if self.running {
                FormAction::None
            } else {
                FormAction::Quit
            };
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % (SUBMIT + 1);
                FormAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + SUBMIT) % (SUBMIT + 1);
                FormAction::None
            }
            KeyCode::Enter if self.submit_focused() => {
                if self.running {
                    FormAction::None
                } else {
                    FormAction::Submit
                }
            }
            KeyCode::Enter => {
                self.focus += 1;
                FormAction::None
            }
            KeyCode::Backspace if !self.running && !self.submit_focused() => {
                self.fields[self.focus].value.pop();
                FormAction::None
            }
            KeyCode::Char(c) if !ctrl && !self.running && !self.submit_focused() => {
                self.fields[self.focus].value.push(c);
                FormAction::None
            }
            _ => FormAction::None,
        }
    }
}
