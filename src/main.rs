//! # Deliver CLI
//!
//! This is the binary entry point for the `deliver` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Handling top-level errors: any error ends the run with its message on
//!   stderr and exit code 1.
//!
//! The core logic lives in the `deliver` library crate, so the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
