//! # Update Command Implementation
//!
//! This module implements the `update` subcommand, which moves packages to
//! the tip of their branches and records the resulting revisions.
//!
//! ## Functionality
//!
//! - **Full update**: every package in `packages.json` is fetched at its
//!   branch tip and `packages.lock` is rewritten from scratch.
//! - **Single package**: `deliver update <name>` refreshes one package and
//!   replaces only its entry in `packages.lock`, creating the lock file if
//!   needed.
//! - **Dry Run**: with `--dry-run`, git commands are printed instead of run
//!   and the lock file is left alone.

use anyhow::Result;
use clap::Args;

use deliver::orchestrator;

use super::{report, with_context, Globals};

/// Update packages to their latest revisions
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Update only this package
    pub name: Option<String>,

    /// Print the dependency tree after fetching
    #[arg(long)]
    pub tree: bool,
}

/// Execute the `update` command.
pub fn execute(args: UpdateArgs, globals: &Globals) -> Result<()> {
    let outcome = with_context(globals, |ctx| {
        orchestrator::update(ctx, args.name.as_deref())
    })?;
    report(&outcome, args.tree, "Updated")
}
