//! # Dependency Fetcher
//!
//! Brings a package's working copy up to date and recurses into the lock file
//! it carries, growing the [`DependencyTree`] as it goes.
//!
//! ## Process
//!
//! For each package:
//!
//! 1.  **Working copy**: clone the source at its branch if there is no
//!     checkout under `<workspace>/src/<name>` yet, otherwise `git fetch`.
//! 2.  **Revision**: a pinned package checks out its revision and is never
//!     pulled. A tracking package checks out the branch tip, pulls it, and
//!     records the resulting commit back into its descriptor.
//! 3.  **Recursion**: if the working copy contains `packages.lock`, every
//!     entry is fetched in name order as a child of the package's node.
//!
//! ## Cycle Detection
//!
//! While a package's subtree is being fetched, its source URL is kept on a
//! stack. Meeting the same source again further down that path aborts the
//! run with [`Error::CycleDetected`]. The same source may still appear in
//! unrelated branches of the tree.
//!
//! Every failure aborts the whole run. Working copies already updated are
//! left as they are.

use std::path::Path;

use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::package::PackageDescriptor;
use crate::repository::SourceControl;
use crate::tree::{DependencyTree, NodeId};
use crate::workspace::Workspace;

/// Fetches packages into a workspace.
pub struct Fetcher<'a> {
    git: &'a dyn SourceControl,
    workspace: &'a Workspace,
    in_progress: Vec<String>,
}

impl<'a> Fetcher<'a> {
    pub fn new(git: &'a dyn SourceControl, workspace: &'a Workspace) -> Self {
        Self {
            git,
            workspace,
            in_progress: Vec::new(),
        }
    }

    /// Fetch every package of `manifest` under `parent`, in name order.
    ///
    /// Resolved revisions are written back into the manifest so it can be
    /// saved as a lock file afterwards.
    pub fn fetch_all(
        &mut self,
        tree: &mut DependencyTree,
        parent: NodeId,
        manifest: &mut Manifest,
    ) -> Result<()> {
        for package in manifest.packages.values_mut() {
            self.fetch(tree, parent, package)?;
        }
        Ok(())
    }

    /// Fetch one package, attach its node under `parent`, and recurse into
    /// its lock file.
    pub fn fetch(
        &mut self,
        tree: &mut DependencyTree,
        parent: NodeId,
        package: &mut PackageDescriptor,
    ) -> Result<NodeId> {
        if self.in_progress.contains(&package.source) {
            let mut cycle = self.in_progress.clone();
            cycle.push(package.source.clone());
            return Err(Error::CycleDetected {
                cycle: cycle.join(" -> "),
            });
        }

        log::info!("fetching {} from {}", package.name, package.source);
        let repo = self.workspace.package_path(&package.name);
        println!("downloading {} -> {}", package.name, repo.display());

        self.workspace.ensure_dir(&repo)?;
        if self.workspace.has_working_copy(&repo)? {
            log::debug!("{}: working copy exists, fetching", package.name);
            self.git.fetch(&repo)?;
        } else {
            log::debug!("{}: cloning {} at {}", package.name, package.source, package.branch());
            self.git.clone_repo(&package.source, package.branch(), &repo)?;
        }
        self.checkout(&repo, package)?;

        let node = tree.add_child(parent, package.clone());

        if let Some(lock_path) = self.workspace.lock_file(&repo)? {
            let mut lock = Manifest::load(&lock_path)?;

            println!("getting dependencies of {}...", package.name);
            self.in_progress.push(package.source.clone());
            let result = self.fetch_all(tree, node, &mut lock);
            self.in_progress.pop();
            result?;
            println!("done with dependencies of {}", package.name);
        }

        log::info!("fetched {} at {}", package.name, package.git_ref());
        Ok(node)
    }

    /// Re-apply the revision policy to an existing working copy without
    /// fetching or recursing.
    pub fn update(&self, package: &mut PackageDescriptor) -> Result<()> {
        let repo = self.workspace.package_path(&package.name);
        self.checkout(&repo, package)
    }

    fn checkout(&self, repo: &Path, package: &mut PackageDescriptor) -> Result<()> {
        if package.has_revision() {
            log::debug!("{}: pinned to {}", package.name, package.revision());
            return self.git.checkout(repo, package.revision());
        }

        let branch = package.branch().to_string();
        log::debug!("{}: tracking tip of {}", package.name, branch);
        self.git.checkout(repo, &branch)?;
        self.git.pull(repo, &branch)?;
        package.revision = Some(self.git.current_revision(repo)?);
        Ok(())
    }
}
