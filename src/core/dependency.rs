//! Dependency declarations.
//!
//! A Dependency is one `<dependency>` entry of a manifest, either a direct
//! dependency or a dependency-management pin. For merging, a dependency is
//! identified by its `(groupId, artifactId)` pair alone.

use serde::{Deserialize, Serialize};

use crate::core::coordinate::{non_empty, ArtifactKey, Coordinate, DEFAULT_EXTENSION};

/// Packaging type of a BOM import.
pub const BOM_TYPE: &str = "pom";

/// Scope of a BOM import.
pub const IMPORT_SCOPE: &str = "import";

/// A transitive artifact a dependency must not pull in.
pub type Exclusion = ArtifactKey;

/// A declared dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub group_id: String,

    pub artifact_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,

    /// Packaging type, written as `<type>` in a POM
    #[serde(rename = "type", default = "default_extension")]
    pub extension: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,

    /// Exclusions, kept in insertion order without duplicates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<Exclusion>,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl Dependency {
    /// Create a dependency with the default type and nothing else set.
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Dependency {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
            classifier: None,
            extension: default_extension(),
            scope: None,
            optional: false,
            exclusions: Vec::new(),
        }
    }

    /// Build a dependency from a parsed coordinate.
    ///
    /// The coordinate's extension becomes the type; an empty classifier is
    /// left unset.
    pub fn from_coordinate(coordinate: &Coordinate) -> Self {
        Dependency {
            version: coordinate.version().map(str::to_string),
            classifier: non_empty(coordinate.classifier()),
            extension: coordinate.extension().to_string(),
            ..Dependency::new(coordinate.group_id(), coordinate.artifact_id())
        }
    }

    /// Build a BOM import (`type = pom`, `scope = import`) from a coordinate.
    pub fn bom(coordinate: &Coordinate) -> Self {
        Dependency {
            extension: BOM_TYPE.to_string(),
            scope: Some(IMPORT_SCOPE.to_string()),
            ..Dependency::from_coordinate(coordinate)
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = non_empty(&version.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_exclusion(mut self, exclusion: Exclusion) -> Self {
        self.add_exclusion(exclusion);
        self
    }

    /// Check whether this dependency has the same identity as a coordinate.
    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        self.group_id == coordinate.group_id() && self.artifact_id == coordinate.artifact_id()
    }

    /// Check whether this dependency is a BOM import.
    pub fn is_bom_import(&self) -> bool {
        self.extension == BOM_TYPE && self.scope.as_deref() == Some(IMPORT_SCOPE)
    }

    /// Add an exclusion unless an equal one is already present.
    ///
    /// Returns `true` if the exclusion was added.
    pub fn add_exclusion(&mut self, exclusion: Exclusion) -> bool {
        if self.exclusions.contains(&exclusion) {
            return false;
        }
        self.exclusions.push(exclusion);
        true
    }

    pub fn has_exclusion(&self, group_id: &str, artifact_id: &str) -> bool {
        self.exclusions.iter().any(|e| e.matches(group_id, artifact_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coordinate() {
        let coordinate = Coordinate::parse("com.acme:lib:zip:dist:1.0").unwrap();
        let dep = Dependency::from_coordinate(&coordinate);

        assert_eq!(dep.group_id, "com.acme");
        assert_eq!(dep.artifact_id, "lib");
        assert_eq!(dep.version.as_deref(), Some("1.0"));
        assert_eq!(dep.classifier.as_deref(), Some("dist"));
        assert_eq!(dep.extension, "zip");
        assert_eq!(dep.scope, None);
    }

    #[test]
    fn test_from_short_coordinate_leaves_optional_fields_unset() {
        let coordinate = Coordinate::parse("com.acme:lib").unwrap();
        let dep = Dependency::from_coordinate(&coordinate);

        assert_eq!(dep.version, None);
        assert_eq!(dep.classifier, None);
        assert_eq!(dep.extension, "jar");
    }

    #[test]
    fn test_bom() {
        let coordinate = Coordinate::parse("com.acme:bom:1.0").unwrap();
        let dep = Dependency::bom(&coordinate);

        assert_eq!(dep.extension, "pom");
        assert_eq!(dep.scope.as_deref(), Some("import"));
        assert_eq!(dep.version.as_deref(), Some("1.0"));
        assert!(dep.is_bom_import());
    }

    #[test]
    fn test_add_exclusion_is_idempotent() {
        let mut dep = Dependency::new("com.acme", "lib");

        assert!(dep.add_exclusion(Exclusion::new("com.bad", "thing")));
        assert!(!dep.add_exclusion(Exclusion::new("com.bad", "thing")));
        assert!(dep.add_exclusion(Exclusion::new("com.bad", "other")));

        assert_eq!(dep.exclusions.len(), 2);
        assert!(dep.has_exclusion("com.bad", "thing"));
    }

    #[test]
    fn test_matches_ignores_version_and_classifier() {
        let dep = Dependency::new("com.acme", "lib").with_version("2.0");
        let coordinate = Coordinate::parse("com.acme:lib:jar:tests:3.0").unwrap();

        assert!(dep.matches(&coordinate));
        assert!(!dep.matches(&Coordinate::parse("com.acme:other").unwrap()));
    }

    #[test]
    fn test_serde_uses_pom_field_names() {
        let dep = Dependency::new("com.acme", "lib").with_version("1.0");
        let json = serde_json::to_value(&dep).unwrap();

        assert_eq!(json["groupId"], "com.acme");
        assert_eq!(json["artifactId"], "lib");
        assert_eq!(json["type"], "jar");
        assert!(json.get("scope").is_none());

        let back: Dependency = serde_json::from_value(json).unwrap();
        assert_eq!(back, dep);
    }
}
