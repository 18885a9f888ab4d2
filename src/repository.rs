//! # Source Control Client
//!
//! This module defines the `SourceControl` trait, the seam between the
//! dependency fetcher and the version-control tool it drives. The fetcher
//! only ever asks for five things: clone, fetch, checkout, pull and "which
//! commit is checked out". Keeping those behind a trait separates the
//! fetch-and-recurse logic from the `git` subprocess.
//!
//! In the application, `SystemGit` is used, which wraps the functions in
//! [`crate::git`] and carries the run's `RunOptions` so dry-run and verbose
//! behavior apply to every command. In tests, a mock implementation records
//! the calls and materializes working copies on disk instead of cloning.

use std::path::Path;

use crate::config::RunOptions;
use crate::error::Result;

/// Trait for source-control operations - allows mocking in tests
pub trait SourceControl {
    /// Clone `url` at `branch` into `dest`.
    fn clone_repo(&self, url: &str, branch: &str, dest: &Path) -> Result<()>;

    /// Fetch remote updates into an existing working copy.
    fn fetch(&self, repo: &Path) -> Result<()>;

    /// Check out a branch or a revision.
    fn checkout(&self, repo: &Path, git_ref: &str) -> Result<()>;

    /// Pull `branch` into the current checkout.
    fn pull(&self, repo: &Path, branch: &str) -> Result<()>;

    /// The commit currently checked out.
    fn current_revision(&self, repo: &Path) -> Result<String>;
}

/// `SourceControl` backed by the system's `git` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit {
    options: RunOptions,
}

impl SystemGit {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }
}

impl SourceControl for SystemGit {
    fn clone_repo(&self, url: &str, branch: &str, dest: &Path) -> Result<()> {
        crate::git::clone(&self.options, url, branch, dest)
    }

    fn fetch(&self, repo: &Path) -> Result<()> {
        crate::git::fetch(&self.options, repo)
    }

    fn checkout(&self, repo: &Path, git_ref: &str) -> Result<()> {
        crate::git::checkout(&self.options, repo, git_ref)
    }

    fn pull(&self, repo: &Path, branch: &str) -> Result<()> {
        crate::git::pull(&self.options, repo, branch)
    }

    fn current_revision(&self, repo: &Path) -> Result<String> {
        crate::git::current_revision(&self.options, repo)
    }
}
