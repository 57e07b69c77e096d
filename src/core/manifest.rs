//! The build manifest model.
//!
//! This is the subset of a POM that override rewriting reads and writes:
//! the project's own coordinates, its parent, direct dependencies,
//! dependency management and repositories. Everything else in the source
//! document is outside the model.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::dependency::Dependency;
use crate::core::repository::Repository;

/// The `<parent>` reference of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    pub group_id: String,

    pub artifact_id: String,

    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
}

impl Parent {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Parent {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            relative_path: None,
        }
    }
}

/// The `<dependencyManagement>` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyManagement {
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

/// A parsed build manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,

    #[serde(default)]
    pub dependencies: Vec<Dependency>,

    /// Absent until the manifest declares one or a BOM is injected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_management: Option<DependencyManagement>,

    #[serde(default)]
    pub repositories: Vec<Repository>,
}

impl Manifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Manifest::default()
    }

    /// Parse a manifest from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse manifest JSON")
    }

    /// Find a direct dependency by group and artifact.
    pub fn dependency(&self, group_id: &str, artifact_id: &str) -> Option<&Dependency> {
        self.dependencies
            .iter()
            .find(|d| d.group_id == group_id && d.artifact_id == artifact_id)
    }

    /// Find a dependency-management entry by group and artifact.
    pub fn managed_dependency(&self, group_id: &str, artifact_id: &str) -> Option<&Dependency> {
        self.dependency_management
            .as_ref()?
            .dependencies
            .iter()
            .find(|d| d.group_id == group_id && d.artifact_id == artifact_id)
    }

    /// Get the dependency management section, creating it if absent.
    pub fn dependency_management_mut(&mut self) -> &mut DependencyManagement {
        self.dependency_management.get_or_insert_with(DependencyManagement::default)
    }

    pub fn repository(&self, id: &str) -> Option<&Repository> {
        self.repositories.iter().find(|r| r.id == id)
    }
}
