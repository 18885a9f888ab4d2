//! # Path Command Implementation
//!
//! Prints the workspace directory, without a trailing newline, so it can be
//! used directly in shell substitutions such as `GOPATH=$(deliver path)`.

use anyhow::Result;

use super::Globals;

/// Execute the `path` command.
pub fn execute(globals: &Globals) -> Result<()> {
    let workspace = globals.workspace()?;
    print!("{}", workspace.path().display());
    Ok(())
}
