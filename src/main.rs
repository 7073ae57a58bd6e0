//! # GitOps Preview CLI
//!
//! This is the binary entry point for the `gitops-preview` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging before any command runs.
//! - Executing the appropriate command based on the parsed arguments.
//!
//! The preview logic lives in the library crate; the binary is a thin
//! wrapper that turns library errors into user-facing messages.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
