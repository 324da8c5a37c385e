//! dbdoc application entry point.
//!
//! Parses the command line, builds a Tokio runtime, and hands off to the CLI
//! dispatcher. Logging is initialized inside the dispatcher once the
//! configuration (which carries the log directory) has been loaded.

#![warn(clippy::all, rust_2018_idioms)]

use clap::Parser as _;
use dbdoc::cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();

    tokio::runtime::Runtime::new()?.block_on(cli::run_command(cli))?;
    Ok(())
}
