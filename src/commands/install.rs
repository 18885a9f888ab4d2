//! # Install Command Implementation
//!
//! This module implements the `install` subcommand, which checks out every
//! package in `packages.lock` at its pinned revision, together with whatever
//! the packages' own lock files require.
//!
//! ## Functionality
//!
//! - **Full install**: every package in `packages.lock`, plus a symlink of
//!   the project into the workspace when the lock file names a
//!   `repository`.
//! - **Single package**: `deliver install <name>` installs only that entry.
//! - **Conflicts**: sources requested at several refs are reported and the
//!   shallowest request is checked out.

use anyhow::Result;
use clap::Args;

use deliver::orchestrator;

use super::{report, with_context, Globals};

/// Install packages from packages.lock
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Install only this package
    pub name: Option<String>,

    /// Print the dependency tree after fetching
    #[arg(long)]
    pub tree: bool,
}

/// Execute the `install` command.
pub fn execute(args: InstallArgs, globals: &Globals) -> Result<()> {
    let outcome = with_context(globals, |ctx| {
        orchestrator::install(ctx, args.name.as_deref())
    })?;
    report(&outcome, args.tree, "Installed")
}
