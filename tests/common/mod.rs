//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures, helper functions, and manifest
//! snippets to reduce duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_lock(manifests::EMPTY);
//!     fixture.command().arg("install").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    #[allow(unused_imports)]
    pub use super::GitRepo;
    pub use super::TestFixture;
}

/// Common manifest documents for testing.
#[allow(dead_code)]
pub mod manifests {
    /// No packages at all.
    pub const EMPTY: &str = r#"{"packages": {}}"#;

    /// One package pinned to a revision.
    pub const PINNED: &str = r#"{
  "packages": {
    "util": {"source": "https://example.invalid/util.git", "revision": "abc123"}
  }
}"#;

    /// Two names sharing one source on different branches.
    pub const SHARED_SOURCE: &str = r#"{
  "packages": {
    "pkgA": {"source": "https://example.invalid/x.git", "branch": "dev"},
    "pkgB": {"source": "https://example.invalid/x.git", "branch": "main"}
  }
}"#;

    /// Not JSON.
    pub const INVALID: &str = "{ packages: ";
}

/// A test fixture with a project directory and an empty workspace.
///
/// ```text
/// <temp>/project   current directory of every command
/// <temp>/ws        $GOPATH, so working copies land in <temp>/ws/src
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with empty project and workspace dirs.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("project")
            .create_dir_all()
            .expect("Failed to create project directory");
        temp_dir
            .child("ws")
            .create_dir_all()
            .expect("Failed to create workspace directory");
        Self { temp_dir }
    }

    /// Add a `packages.json` with the given content.
    #[allow(dead_code)]
    pub fn with_manifest(self, content: &str) -> Self {
        self.with_file("packages.json", content)
    }

    /// Add a `packages.lock` with the given content.
    #[allow(dead_code)]
    pub fn with_lock(self, content: &str) -> Self {
        self.with_file("packages.lock", content)
    }

    /// Add a file to the project directory.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child("project")
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// The project directory.
    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().join("project")
    }

    /// The workspace directory.
    #[allow(dead_code)]
    pub fn workspace(&self) -> PathBuf {
        self.temp_dir.path().join("ws")
    }

    /// Get access to the underlying TempDir for advanced usage.
    #[allow(dead_code)]
    pub fn temp_dir(&self) -> &assert_fs::TempDir {
        &self.temp_dir
    }

    /// Create a command running in the project directory with `$GOPATH`
    /// pointing at the workspace and no deliver settings inherited from the
    /// environment.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("deliver");
        cmd.current_dir(self.path())
            .env("GOPATH", self.workspace())
            .env("NO_COLOR", "1")
            .env_remove("DELIVER_ROOT")
            .env_remove("DELIVER_WORKSPACE")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A local git repository usable as a package source.
#[allow(dead_code)]
pub struct GitRepo {
    path: PathBuf,
}

#[allow(dead_code)]
impl GitRepo {
    /// Initialize a repository at `path` with one commit on `master`.
    pub fn init(path: &Path) -> Self {
        std::fs::create_dir_all(path).expect("Failed to create repo directory");
        let repo = Self {
            path: path.to_path_buf(),
        };
        repo.git(&["init", "--quiet"]);
        repo.commit_file("README.md", "hello\n");
        repo.git(&["branch", "-M", "master"]);
        repo
    }

    /// Write a file and commit it, returning the new revision.
    pub fn commit_file(&self, name: &str, content: &str) -> String {
        std::fs::write(self.path.join(name), content).expect("Failed to write file");
        self.git(&["add", "."]);
        self.git(&[
            "-c",
            "user.name=deliver-test",
            "-c",
            "user.email=deliver-test@example.invalid",
            "commit",
            "--quiet",
            "-m",
            name,
        ]);
        self.head()
    }

    /// The revision checked out.
    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"]).trim().to_string()
    }

    /// The repository location, usable as a clone URL.
    pub fn url(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// Run git in this repository and return stdout.
    pub fn git(&self, args: &[&str]) -> String {
        Self::git_in(&self.path, args)
    }

    /// Run git in `dir` and return stdout.
    pub fn git_in(dir: &Path, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_project_and_workspace() {
        let fixture = TestFixture::new();
        assert!(fixture.path().is_dir());
        assert!(fixture.workspace().is_dir());
    }

    #[test]
    fn test_fixture_with_lock() {
        let fixture = TestFixture::new().with_lock(manifests::EMPTY);
        assert!(fixture.path().join("packages.lock").exists());
    }

    #[test]
    fn test_manifests_are_valid_json() {
        for manifest in [manifests::EMPTY, manifests::PINNED, manifests::SHARED_SOURCE] {
            serde_json::from_str::<serde_json::Value>(manifest)
                .expect("Manifest should be valid JSON");
        }
        assert!(serde_json::from_str::<serde_json::Value>(manifests::INVALID).is_err());
    }
}
