//! Full-screen form front-end.
//!
//! The render loop owns the [`FormState`]. Submitting starts one worker
//! thread that runs the shared workflow and sends [`FormEvent`]s back over
//! a channel; the loop drains them between key polls.

pub mod state;
pub mod view;

pub use state::{FormAction, FormEvent, FormField, FormState, LogLevel, LogLine};

use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Context;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::event::{self, Event};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::Terminal;

use crate::error::Result;
use crate::params::RunParameters;
use crate::shell::{OutputLine, OutputSink, SystemRunner};
use crate::workflow::{Installer, WorkflowOptions};

/// How long to wait for a key before draining worker events again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

type FormTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Show the form until the user quits.
pub fn run(options: WorkflowOptions) -> Result<()> {
    enable_raw_mode().context("terminal does not support raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("could not enter the alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, options);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut FormTerminal, options: WorkflowOptions) -> Result<()> {
    let mut state = FormState::new();
    let (tx, rx) = mpsc::channel();
    let mut worker: Option<JoinHandle<()>> = None;

    loop {
        drain(&rx, &mut state);
        if !state.running {
            if let Some(handle) = worker.take() {
                let _ = handle.join();
            }
        }

        terminal.draw(|f| view::render(f, &state))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match state.handle_key(key) {
            FormAction::None => {}
            FormAction::Quit => return Ok(()),
            FormAction::Submit => {
                if let Some(params) = state.submit() {
                    worker = Some(spawn_run(params, options.clone(), tx.clone()));
                }
            }
        }
    }
}

fn drain(rx: &Receiver<FormEvent>, state: &mut FormState) {
    while let Ok(event) = rx.try_recv() {
        state.apply(event);
    }
}

/// Run the workflow on a worker thread, reporting through `tx`.
///
/// Child process output is captured into the log instead of the terminal.
fn spawn_run(
    params: RunParameters,
    options: WorkflowOptions,
    tx: Sender<FormEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let output_tx = tx.clone();
        let sink: OutputSink = Arc::new(move |line: OutputLine| {
            let _ = output_tx.send(FormEvent::Output(line.text().to_string()));
        });
        let runner = SystemRunner::streaming(sink);
        let installer = Installer::new(&runner, options);

        let result = installer.run(&params, &mut |progress| {
            let _ = tx.send(FormEvent::Progress(progress));
        });
        if let Err(e) = &result {
            tracing::debug!("Form run failed: {}", e);
        }
        let _ = tx.send(FormEvent::Finished(result));
    })
}
