//! # Package Descriptors
//!
//! A `PackageDescriptor` identifies one dependency: the name its working copy
//! is stored under, the git source it comes from, and how it is pinned.
//!
//! A package is either *pinned* (it carries a revision, which is checked out
//! exactly and never refreshed) or *tracking* (it follows the tip of its
//! branch, and the fetcher records the concrete commit once it is known).

use serde::{Deserialize, Deserializer, Serialize};

use crate::defaults::{DEFAULT_BRANCH, HEAD_REVISION};

/// Identity and pinning state of one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Name of the working copy. Filled in from the manifest key on load.
    #[serde(skip)]
    pub name: String,

    /// Git URL. Two packages with the same source share a source identity.
    #[serde(alias = "Source")]
    pub source: String,

    /// Branch to track. Empty means the default branch.
    #[serde(
        default,
        alias = "Branch",
        skip_serializing_if = "String::is_empty"
    )]
    pub branch: String,

    /// Pinned revision, if any.
    #[serde(
        default,
        alias = "Revision",
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub revision: Option<String>,
}

impl PackageDescriptor {
    /// Creates a descriptor that tracks `branch` (or the default branch when
    /// `branch` is empty).
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            branch: branch.into(),
            revision: None,
        }
    }

    /// Returns this descriptor pinned to `revision`.
    pub fn pinned(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    /// The branch to check out, defaulting to `master`.
    pub fn branch(&self) -> &str {
        if self.branch.is_empty() {
            DEFAULT_BRANCH
        } else {
            &self.branch
        }
    }

    /// The pinned revision, or `HEAD` for a tracking package.
    pub fn revision(&self) -> &str {
        match &self.revision {
            Some(rev) if !rev.is_empty() => rev,
            _ => HEAD_REVISION,
        }
    }

    pub fn has_revision(&self) -> bool {
        self.revision.as_deref().is_some_and(|rev| !rev.is_empty())
    }

    /// `branch/revision`, used both for display and to compare checkout
    /// targets of the same source.
    pub fn git_ref(&self) -> String {
        format!("{}/{}", self.branch(), self.revision())
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|rev| !rev.is_empty()))
}
