//! CLI argument definitions.
//!
//! The CLI only selects a front-end and diagnostics; run parameters are
//! always entered by the user.

use clap::{Parser, Subcommand};

/// KnowWhere Installer - license-gated provisioning for the KnowWhere stack.
#[derive(Debug, Parser)]
#[command(name = "knowwhere-installer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Prompt line by line, then provision (default if no command specified)
    Run,

    /// Fill in a full-screen form, then provision
    Form,
}

impl Cli {
    /// The subcommand, with `run` as the default.
    pub fn subcommand(&self) -> Commands {
        self.command.unwrap_or(Commands::Run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["knowwhere-installer"]).unwrap();
        assert_eq!(cli.subcommand(), Commands::Run);
        assert!(!cli.debug);
    }

    #[test]
    fn form_subcommand_with_global_flags() {
        let cli =
            Cli::try_parse_from(["knowwhere-installer", "form", "--debug", "--no-color"]).unwrap();
        assert_eq!(cli.subcommand(), Commands::Form);
        assert!(cli.debug);
        assert!(cli.no_color);
    }

    #[test]
    fn parameters_are_not_flags() {
        assert!(Cli::try_parse_from(["knowwhere-installer", "--api-key", "abc"]).is_err());
    }
}
