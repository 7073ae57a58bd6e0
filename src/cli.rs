//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use gitops_preview::defaults::{DEFAULT_LOG_LEVEL, LOG_LEVEL_ENV};

use crate::commands;

/// GitOps Preview - Render Argo CD Applications offline, from the local working tree
#[derive(Parser, Debug)]
#[command(name = "gitops-preview")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        env = LOG_LEVEL_ENV,
        default_value = DEFAULT_LOG_LEVEL
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Preview Applications and the resources they generate
    App(commands::app::AppArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::App(args) => commands::app::execute(args, &self.color),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Logs go to stderr so that previews on stdout stay pipeable.
fn init_logging(level: &str) {
    if let Err(e) = env_logger::Builder::new()
        .parse_filters(level)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init()
    {
        log::debug!("Keeping the existing logger: {}", e);
    }
}
