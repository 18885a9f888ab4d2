//! # Git Subprocess
//!
//! Thin wrappers around the system `git` binary, one per command the
//! fetcher needs. Every invocation is announced through [`RunOptions`], so
//! `--verbose` echoes it and `--dry-run` prints it without running anything.
//!
//! Arguments are passed as `OsStr`, so working-copy paths reach `git`
//! unchanged even when they are not valid UTF-8.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use crate::config::RunOptions;
use crate::defaults::UNKNOWN_REVISION;
use crate::error::Error;

/// Run `git` with the given arguments, optionally inside `dir`.
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Personal access tokens
/// - Any authentication configured in ~/.gitconfig
///
/// In dry-run mode the command is only printed and an empty string is
/// returned.
pub fn run_git<S: AsRef<OsStr>>(
    options: &RunOptions,
    dir: Option<&Path>,
    args: &[S],
) -> Result<String, Error> {
    let mut words = vec![String::from("git")];
    words.extend(args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()));
    let line: Vec<&str> = words.iter().map(String::as_str).collect();
    options.announce(&line);

    if !options.executes() {
        return Ok(String::new());
    }

    let mut command = Command::new("git");
    command.args(args);
    if let Some(dir) = dir {
        command.current_dir(dir);
    }

    let path = dir.map(Path::to_path_buf).unwrap_or_default();
    let output = command.output().map_err(|e| Error::SourceControl {
        command: line.join(" "),
        path: path.clone(),
        stderr: e.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        // Provide helpful error message for common auth failures
        let stderr = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            format!(
                "Authentication failed. Make sure you have access to the repository.\n\
                For private repos, ensure you have:\n\
                - SSH key added to ssh-agent\n\
                - Git credentials configured\n\
                Error: {}",
                stderr
            )
        } else {
            stderr.trim_end().to_string()
        };

        return Err(Error::SourceControl {
            command: line.join(" "),
            path,
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Clone `url` at `branch` into `dest`.
pub fn clone(options: &RunOptions, url: &str, branch: &str, dest: &Path) -> Result<(), Error> {
    let args = [
        OsStr::new("clone"),
        OsStr::new("-b"),
        OsStr::new(branch),
        OsStr::new(url),
        dest.as_os_str(),
    ];
    run_git(options, None, &args)?;
    Ok(())
}

/// Fetch remote updates without touching the checkout.
pub fn fetch(options: &RunOptions, repo: &Path) -> Result<(), Error> {
    run_git(options, Some(repo), &["fetch"])?;
    Ok(())
}

/// Check out a branch or revision.
pub fn checkout(options: &RunOptions, repo: &Path, git_ref: &str) -> Result<(), Error> {
    run_git(options, Some(repo), &["checkout", git_ref])?;
    Ok(())
}

/// Pull `branch` from `origin`.
pub fn pull(options: &RunOptions, repo: &Path, branch: &str) -> Result<(), Error> {
    run_git(options, Some(repo), &["pull", "origin", branch])?;
    Ok(())
}

/// The commit currently checked out in `repo`.
pub fn current_revision(options: &RunOptions, repo: &Path) -> Result<String, Error> {
    let output = run_git(options, Some(repo), &["rev-parse", "HEAD"])?;
    Ok(parse_revision(&output))
}

/// Strip the trailing newline from `rev-parse` output.
fn parse_revision(output: &str) -> String {
    let revision = output.trim_end_matches(['\n', '\r']);
    if revision.is_empty() {
        UNKNOWN_REVISION.to_string()
    } else {
        revision.to_string()
    }
}
