//! # Workspace Layout
//!
//! Working copies live under `<workspace>/src/<package name>`. The workspace
//! itself is either the first entry of `$GOPATH`, or, in project-workspace
//! mode, a directory dedicated to the project:
//!
//! ```text
//! <root>/deliver_workspaces/<absolute project dir>/src/<package>
//! ```
//!
//! where the project dir is the nearest ancestor of the current directory
//! containing `packages.json`, and `<root>` is `--root` or the home directory.
//!
//! Mutating operations (directory creation, symlinks) go through the run's
//! `RunOptions`, so they are echoed in verbose mode and skipped in dry-run.

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::config::{RunOptions, WorkspaceOptions};
use crate::defaults::{default_workspace_root, LOCK_FILE, PACKAGE_FILE, WORKSPACES_DIR};
use crate::error::{Error, Result};

/// The directory tree holding every working copy of a run.
#[derive(Debug, Clone)]
pub struct Workspace {
    path: PathBuf,
    options: RunOptions,
}

impl Workspace {
    pub fn new(path: impl Into<PathBuf>, options: RunOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// Locate the workspace from the process environment.
    pub fn from_env(workspace: &WorkspaceOptions, options: RunOptions) -> Result<Self> {
        let cwd = env::current_dir()?;
        let gopath = env::var_os("GOPATH");
        let path = discover(workspace, &cwd, gopath.as_deref())?;
        Ok(Self::new(path, options))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn src_dir(&self) -> PathBuf {
        self.path.join("src")
    }

    /// Where the working copy for package `name` lives.
    ///
    /// Root, prefix and `..` components of `name` are dropped, so the result
    /// is always inside `src/`.
    pub fn package_path(&self, name: &str) -> PathBuf {
        self.src_dir().join(relative_to_root(Path::new(name)))
    }

    /// `mkdir -p`, honoring dry-run.
    pub fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if dir.exists() {
            return Ok(());
        }
        let display = dir.to_string_lossy();
        self.options.announce(&["mkdir", "-p", &display]);
        if self.options.executes() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Whether `dir` already holds a git working copy.
    pub fn has_working_copy(&self, dir: &Path) -> Result<bool> {
        exists(&dir.join(".git"))
    }

    /// The lock file inside a working copy, if it has one.
    pub fn lock_file(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let lock = dir.join(LOCK_FILE);
        Ok(exists(&lock)?.then_some(lock))
    }

    /// Make the project reachable at `<workspace>/src/<repository>` by
    /// symlinking `project_dir` there, replacing any previous link.
    pub fn link_repository(&self, repository: &str, project_dir: &Path) -> Result<()> {
        let link = self.src_dir().join(relative_to_root(Path::new(repository)));
        if link == project_dir {
            println!("skipping symlink...");
            return Ok(());
        }

        if let Some(parent) = link.parent() {
            let parent_display = parent.to_string_lossy();
            self.options.announce(&["mkdir", "-p", &parent_display]);
            if self.options.executes() {
                fs::create_dir_all(parent)?;
            }
        }

        let link_display = link.to_string_lossy();
        let target_display = project_dir.to_string_lossy();

        self.options.announce(&["rm", "-f", &link_display]);
        if self.options.executes() {
            match fs::remove_file(&link) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        self.options
            .announce(&["ln", "-s", &target_display, &link_display]);
        if self.options.executes() {
            symlink(project_dir, &link)?;
        }
        Ok(())
    }
}

/// Work out the workspace directory.
///
/// `cwd` is where the search for a project starts and `gopath` is the raw
/// `$GOPATH` value; both are parameters so discovery can be exercised
/// without touching the process environment.
pub fn discover(
    workspace: &WorkspaceOptions,
    cwd: &Path,
    gopath: Option<&OsStr>,
) -> Result<PathBuf> {
    if !workspace.project_workspace {
        return first_gopath_entry(gopath);
    }

    for dir in cwd.ancestors() {
        if exists(&dir.join(PACKAGE_FILE))? {
            let root = workspace
                .root
                .clone()
                .unwrap_or_else(default_workspace_root);
            return Ok(root.join(WORKSPACES_DIR).join(relative_to_root(dir)));
        }
    }

    log::debug!(
        "no {} above {}, falling back to $GOPATH",
        PACKAGE_FILE,
        cwd.display()
    );
    first_gopath_entry(gopath)
}

fn first_gopath_entry(gopath: Option<&OsStr>) -> Result<PathBuf> {
    gopath
        .and_then(|value| env::split_paths(value).find(|p| !p.as_os_str().is_empty()))
        .ok_or_else(|| Error::Workspace {
            message: "GOPATH is not set; set it or pass --deliver-workspace".to_string(),
        })
}

/// Keep only the normal components of `dir`, so it can be nested under
/// another directory without escaping it.
fn relative_to_root(dir: &Path) -> PathBuf {
    dir.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

/// `Path::exists`, but surfacing errors other than "not found".
fn exists(path: &Path) -> Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}
