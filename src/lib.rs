//! # deliver
//!
//! This library fetches a project's git dependencies into a workspace, follows
//! the lock files those dependencies carry to fetch their own dependencies,
//! and reports sources that end up requested at more than one ref. It backs
//! the `deliver` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use deliver::package::PackageDescriptor;
//! use deliver::resolve::resolve;
//! use deliver::tree::DependencyTree;
//!
//! let mut tree = DependencyTree::new();
//! let root = tree.root();
//! tree.add_child(root, PackageDescriptor::new("a", "https://example.com/x.git", "dev"));
//! tree.add_child(root, PackageDescriptor::new("b", "https://example.com/x.git", "main"));
//!
//! let report = resolve(&tree);
//! assert_eq!(report.len(), 1);
//! assert_eq!(report.resolved(&tree)[0].name, "a");
//! ```
//!
//! ## Core Concepts
//!
//! - **Packages (`package`, `manifest`)**: A `PackageDescriptor` names a git
//!   source, a branch and optionally a pinned revision. Manifests
//!   (`packages.json`) and lock files (`packages.lock`) are JSON maps of them.
//! - **Workspace (`workspace`)**: Working copies live under
//!   `<workspace>/src/<name>`. The workspace is `$GOPATH` or a
//!   project-specific directory.
//! - **Source control (`repository`, `git`)**: The `SourceControl` trait and
//!   its `git` subprocess implementation.
//! - **Dependency tree (`tree`)**: An arena of nodes recording which package
//!   pulled in which.
//! - **Fetching (`fetch`)**: Clones or updates working copies and recurses
//!   into their lock files.
//! - **Resolution (`resolve`)**: Picks the shallowest request for every
//!   source requested at several refs.
//!
//! ## Execution Flow
//!
//! The `orchestrator` runs `install` and `update`:
//!
//! 1.  **Fetch**: Fetch every package recursively, building the tree.
//! 2.  **Resolve**: Find conflicting sources once the tree is complete.
//! 3.  **Apply**: Check out the canonical ref in the winning package's
//!     working copy.

pub mod config;
pub mod defaults;
pub mod error;
pub mod fetch;
pub mod git;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod package;
pub mod repository;
pub mod resolve;
pub mod tree;
pub mod workspace;

#[cfg(test)]
mod resolve_proptest;
