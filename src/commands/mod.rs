//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `deliver` command-line tool, one file per command.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` together with the
//!   global [`Globals`] and calls into the `deliver` library.

use std::env;

use anyhow::Result;
use ptree::print_tree;

use deliver::config::{RunOptions, WorkspaceOptions};
use deliver::orchestrator::{Context, Outcome};
use deliver::output::summary_marker;
use deliver::repository::SystemGit;
use deliver::workspace::Workspace;

pub mod install;
pub mod path;
pub mod update;

/// Settings from the global flags, shared by every command.
#[derive(Debug, Clone)]
pub struct Globals {
    pub run: RunOptions,
    pub workspace: WorkspaceOptions,
}

impl Globals {
    pub fn workspace(&self) -> Result<Workspace> {
        Ok(Workspace::from_env(&self.workspace, self.run)?)
    }
}

/// Set up the workspace and git client for the current directory, then run
/// `op` with them.
fn with_context<F>(globals: &Globals, op: F) -> Result<Outcome>
where
    F: FnOnce(&Context<'_>) -> deliver::error::Result<Outcome>,
{
    let workspace = globals.workspace()?;
    let git = SystemGit::new(globals.run);
    let ctx = Context {
        git: &git,
        workspace: &workspace,
        project_dir: env::current_dir()?,
        options: globals.run,
    };
    Ok(op(&ctx)?)
}

/// Print the tree if asked, then a one-line summary.
fn report(outcome: &Outcome, show_tree: bool, verb: &str) -> Result<()> {
    log::debug!("dependency tree:\n{}", outcome.tree.dump());

    if show_tree {
        print_tree(&outcome.tree.view("."))?;
    }

    let fetched = outcome.tree.len() - 1;
    if outcome.report.is_empty() {
        println!(
            "{} {} {} package(s)",
            summary_marker(false),
            verb,
            fetched
        );
    } else {
        println!(
            "{} {} {} package(s), {} conflicting source(s) resolved",
            summary_marker(true),
            verb,
            fetched,
            outcome.report.len()
        );
    }
    Ok(())
}
