//! # Run Configuration
//!
//! Settings that shape how a run behaves, built once by the CLI and passed
//! explicitly to every component that needs them.
//!
//! - **`RunOptions`**: dry-run and verbose switches. In dry-run mode external
//!   commands are printed instead of executed; in verbose mode they are
//!   printed and then executed.
//! - **`WorkspaceOptions`**: where the workspace lives and whether a
//!   project-specific workspace is used instead of `$GOPATH`.

use std::path::PathBuf;

/// Dry-run and verbose switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Print commands without running them.
    pub dry_run: bool,
    /// Print commands while running them.
    pub verbose: bool,
}

impl RunOptions {
    pub fn new(dry_run: bool, verbose: bool) -> Self {
        Self { dry_run, verbose }
    }

    /// Whether external commands and filesystem mutations should happen.
    pub fn executes(&self) -> bool {
        !self.dry_run
    }

    /// Print a command line to stdout if in dry-run or verbose mode.
    pub fn announce(&self, args: &[&str]) {
        if self.dry_run || self.verbose {
            println!("{}", args.join(" "));
        }
        log::debug!("command: {}", args.join(" "));
    }
}

/// How the workspace directory is located.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceOptions {
    /// Directory under which `deliver_workspaces/` is created. Defaults to
    /// the user's home directory.
    pub root: Option<PathBuf>,
    /// Use a project-specific workspace instead of the first `$GOPATH` entry.
    pub project_workspace: bool,
}
