//! Remote repository declarations.

use serde::{Deserialize, Serialize};

/// Layout used for every repository this crate declares.
pub const DEFAULT_LAYOUT: &str = "default";

/// Whether a repository serves releases or snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryPolicy {
    pub enabled: bool,
}

impl RepositoryPolicy {
    pub const ENABLED: RepositoryPolicy = RepositoryPolicy { enabled: true };
    pub const DISABLED: RepositoryPolicy = RepositoryPolicy { enabled: false };
}

impl Default for RepositoryPolicy {
    fn default() -> Self {
        RepositoryPolicy::ENABLED
    }
}

impl From<bool> for RepositoryPolicy {
    fn from(enabled: bool) -> Self {
        RepositoryPolicy { enabled }
    }
}

/// A `<repository>` entry.
///
/// Two repositories are considered the same if they share either the id
/// or the url.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub url: String,

    #[serde(default = "default_layout")]
    pub layout: String,

    #[serde(default)]
    pub releases: RepositoryPolicy,

    #[serde(default)]
    pub snapshots: RepositoryPolicy,
}

fn default_layout() -> String {
    DEFAULT_LAYOUT.to_string()
}

impl Repository {
    /// Create a repository with the default layout and both policies enabled.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Repository {
            id: id.into(),
            name: None,
            url: url.into(),
            layout: default_layout(),
            releases: RepositoryPolicy::ENABLED,
            snapshots: RepositoryPolicy::ENABLED,
        }
    }

    pub fn with_releases(mut self, policy: impl Into<RepositoryPolicy>) -> Self {
        self.releases = policy.into();
        self
    }

    pub fn with_snapshots(mut self, policy: impl Into<RepositoryPolicy>) -> Self {
        self.snapshots = policy.into();
        self
    }

    pub fn releases_enabled(&self) -> bool {
        self.releases.enabled
    }

    pub fn snapshots_enabled(&self) -> bool {
        self.snapshots.enabled
    }

    /// Check whether `other` would duplicate this repository.
    pub fn same_as(&self, other: &Repository) -> bool {
        self.url == other.url || self.id == other.id
    }
}
