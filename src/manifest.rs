//! # Manifest Codec
//!
//! Loads and saves the JSON package lists used by `deliver`: the project's
//! `packages.json` and the `packages.lock` written after an update. Both files
//! share one shape:
//!
//! ```json
//! {
//!   "repository": "github.com/me/project",
//!   "packages": {
//!     "util": { "source": "https://example.com/util.git", "branch": "dev", "revision": "4f2c..." }
//!   }
//! }
//! ```
//!
//! Packages are held in a `BTreeMap`, so every consumer iterates them sorted
//! by name. Dependency discovery order, and with it the outcome of conflict
//! resolution, is therefore reproducible from run to run.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::package::PackageDescriptor;

/// A package list, either a manifest or a lock file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Import path the project itself should be reachable under in the
    /// workspace.
    #[serde(
        default,
        alias = "Repository",
        skip_serializing_if = "Option::is_none"
    )]
    pub repository: Option<String>,

    /// Dependencies keyed by package name.
    #[serde(default, alias = "Packages")]
    pub packages: BTreeMap<String, PackageDescriptor>,
}

impl Manifest {
    /// Parse a manifest from a JSON string.
    ///
    /// Descriptor names are taken from their keys, and an empty repository
    /// string counts as unset.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut manifest: Manifest =
            serde_json::from_str(content).map_err(|e| Error::ManifestParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        for (name, package) in manifest.packages.iter_mut() {
            package.name = name.clone();
        }
        if manifest.repository.as_deref() == Some("") {
            manifest.repository = None;
        }

        Ok(manifest)
    }

    /// Load a manifest that must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Load a manifest, or start an empty one if the file does not exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the manifest as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(|e| Error::ManifestParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, content + "\n")?;
        Ok(())
    }

    /// Look up a package by name, reporting `file` in the error if absent.
    pub fn package(&self, name: &str, file: &str) -> Result<&PackageDescriptor> {
        self.packages.get(name).ok_or_else(|| Error::Lookup {
            name: name.to_string(),
            file: file.to_string(),
        })
    }

    /// Insert or replace a package under its own name.
    pub fn insert(&mut self, package: PackageDescriptor) {
        self.packages.insert(package.name.clone(), package);
    }
}
