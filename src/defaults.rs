//! Default values and well-known file names.
//!
//! This module centralizes the names and fallbacks shared by the library and
//! the CLI, so that every command agrees on where manifests live and how an
//! unset branch or revision is spelled.

use std::path::PathBuf;

/// The manifest listing a project's direct dependencies.
pub const PACKAGE_FILE: &str = "packages.json";

/// The lock file pinning every dependency to a concrete revision.
pub const LOCK_FILE: &str = "packages.lock";

/// Directory (under the workspace root) holding per-project workspaces.
pub const WORKSPACES_DIR: &str = "deliver_workspaces";

/// Branch used when a package does not name one.
pub const DEFAULT_BRANCH: &str = "master";

/// Revision label used in refs for packages that track a branch tip.
pub const HEAD_REVISION: &str = "HEAD";

/// Placeholder revision reported when `git rev-parse` produced nothing,
/// which is always the case in dry-run mode.
pub const UNKNOWN_REVISION: &str = "<REV>";

/// Returns the default root under which project workspaces are created.
///
/// This is the user's home directory, falling back to the current directory
/// if it cannot be determined. It can be overridden by the `--root` CLI flag
/// or the `DELIVER_ROOT` environment variable.
pub fn default_workspace_root() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
