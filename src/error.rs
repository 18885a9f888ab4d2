//! # Error Handling
//!
//! This module defines the centralized error type for `deliver`. It uses the
//! `thiserror` library to build a single `Error` enum covering every failure
//! the library can report, each with enough context to print a useful message.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failure modes:
//!   - filesystem I/O
//!   - `git` subprocess failures
//!   - malformed manifests
//!   - missing package names
//!   - dependency cycles
//!   - workspace discovery problems
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Every error is fatal to a run. Nothing in the library retries or rolls
//! back; errors travel up through `?` until the binary prints them and exits
//! with a non-zero status.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for deliver operations
#[derive(Error, Debug)]
pub enum Error {
    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A `git` invocation could not be started or exited unsuccessfully.
    #[error("Git command failed in {}: {command} - {stderr}", path.display())]
    SourceControl {
        command: String,
        path: PathBuf,
        stderr: String,
    },

    /// A manifest or lock file could not be read as a package list.
    #[error("Manifest parsing error in {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    /// A package name was requested that the manifest does not list.
    #[error("Package {name} not found in {file}")]
    Lookup { name: String, file: String },

    /// A package transitively depends on its own source.
    #[error("Cycle detected in package dependencies: {cycle}")]
    CycleDetected { cycle: String },

    /// The workspace directory could not be determined.
    #[error("Workspace error: {message}")]
    Workspace { message: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
