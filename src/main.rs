//! KnowWhere installer entry point.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use knowwhere_installer::cli::{Cli, CommandDispatcher, Commands};
use knowwhere_installer::ui::create_ui;
use knowwhere_installer::workflow::WorkflowOptions;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("knowwhere_installer=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("knowwhere_installer=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Log lines would draw over the form, so it only logs when asked to.
    if cli.subcommand() != Commands::Form || cli.debug {
        init_tracing(cli.debug);
    }

    tracing::debug!("Installer starting with args: {:?}", cli);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
        console::set_colors_enabled(false);
    }

    let mut ui = create_ui(std::io::stdin().is_terminal());
    let dispatcher = CommandDispatcher::new(WorkflowOptions::default());

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.process_code()),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
