//! Artifact coordinates - the textual `group:artifact[...]` references
//! used by override directives.
//!
//! The grammar is
//!
//! ```text
//! <groupId>:<artifactId>[:<extension>[:<classifier>]][:<version>]
//! ```
//!
//! which is ambiguous for three and four segments. Resolution is by
//! position: a four or five segment coordinate always fills the classifier
//! slot (so its third segment is the extension), while a three segment
//! coordinate is `group:artifact:version`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::util::diagnostic::MalformedCoordinateError;

/// Extension used when a coordinate does not name one.
pub const DEFAULT_EXTENSION: &str = "jar";

/// Classifier used when a coordinate does not name one.
pub const EMPTY_CLASSIFIER: &str = "";

/// Human-readable form of the coordinate grammar, used in error messages.
pub const COORDINATE_GRAMMAR: &str =
    "<groupId>:<artifactId>[:<extension>[:<classifier>]][:<version>]";

/// The `(groupId, artifactId)` pair that identifies an artifact for merging.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactKey {
    pub group_id: String,
    pub artifact_id: String,
}

impl ArtifactKey {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        ArtifactKey {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    /// Check whether this key names the given group and artifact.
    pub fn matches(&self, group_id: &str, artifact_id: &str) -> bool {
        self.group_id == group_id && self.artifact_id == artifact_id
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// A parsed artifact coordinate.
///
/// Coordinates are immutable once parsed. An absent version is `None`,
/// never an empty string; an unspecified classifier is the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    group_id: String,
    artifact_id: String,
    extension: String,
    classifier: String,
    version: Option<String>,
}

impl Coordinate {
    /// Create a coordinate with the default extension, no classifier and
    /// no version.
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Coordinate {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            classifier: EMPTY_CLASSIFIER.to_string(),
            version: None,
        }
    }

    /// Set the version. An empty string means no version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = non_empty(&version.into());
        self
    }

    /// Set the extension. An empty string keeps the default.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        if !extension.is_empty() {
            self.extension = extension;
        }
        self
    }

    /// Set the classifier.
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = classifier.into();
        self
    }

    /// Parse a coordinate string.
    ///
    /// Segments are split on `:`. Group and artifact must be non-empty, no
    /// segment may contain a space, and at most five segments are allowed.
    /// The extension segment may be empty (`g:a::classifier`), the
    /// classifier and trailing version segments may not.
    pub fn parse(text: &str) -> Result<Self, MalformedCoordinateError> {
        let malformed = || MalformedCoordinateError::new(text);

        if text.contains(' ') {
            return Err(malformed());
        }

        let segments: Vec<&str> = text.split(':').collect();
        let (group_id, artifact_id, rest) = match segments.as_slice() {
            [group_id, artifact_id, rest @ ..] if !group_id.is_empty() && !artifact_id.is_empty() => {
                (*group_id, *artifact_id, rest)
            }
            _ => return Err(malformed()),
        };

        let coordinate = Coordinate::new(group_id, artifact_id);
        let coordinate = match rest {
            [] => coordinate,
            // `g:a:` is accepted and carries no version.
            [version] => coordinate.with_version(*version),
            [extension, classifier] if !classifier.is_empty() => coordinate
                .with_extension(*extension)
                .with_classifier(*classifier),
            [extension, classifier, version] if !classifier.is_empty() && !version.is_empty() => {
                coordinate
                    .with_extension(*extension)
                    .with_classifier(*classifier)
                    .with_version(*version)
            }
            _ => return Err(malformed()),
        };

        Ok(coordinate)
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The classifier, empty when unspecified.
    pub fn classifier(&self) -> &str {
        &self.classifier
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The `(groupId, artifactId)` identity of this coordinate.
    pub fn key(&self) -> ArtifactKey {
        ArtifactKey::new(&self.group_id, &self.artifact_id)
    }
}

/// Formats the coordinate as `group:artifact[:extension:classifier][:version]`.
///
/// The extension is only written alongside a classifier. The grammar has no
/// form for `group:artifact:extension:version`, so a coordinate with a
/// non-`jar` extension and no classifier renders without its extension and
/// does not parse back to itself.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        if !self.classifier.is_empty() {
            write!(f, ":{}:{}", self.extension, self.classifier)?;
        }
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        Ok(())
    }
}

impl FromStr for Coordinate {
    type Err = MalformedCoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coordinate::parse(s)
    }
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    /// Parse with the reference pattern, mapping groups to fields the way
    /// the coordinate grammar prescribes.
    fn parse_with_pattern(text: &str) -> Option<(String, String, String, String, Option<String>)> {
        let pattern =
            Regex::new(r"^([^: ]+):([^: ]+)(:([^: ]*)(:([^: ]+))?)?(:([^: ]+))?$").unwrap();
        let caps = pattern.captures(text)?;
        let group = |i: usize| caps.get(i).map(|m| m.as_str()).filter(|s| !s.is_empty());

        let mut extension = DEFAULT_EXTENSION.to_string();
        let mut classifier = EMPTY_CLASSIFIER.to_string();
        let version;
        if let Some(cls) = group(6) {
            if let Some(ext) = group(4) {
                extension = ext.to_string();
            }
            classifier = cls.to_string();
            version = group(8).map(str::to_string);
        } else {
            version = group(4).map(str::to_string);
        }

        Some((
            caps[1].to_string(),
            caps[2].to_string(),
            extension,
            classifier,
            version,
        ))
    }

    fn fields(c: &Coordinate) -> (String, String, String, String, Option<String>) {
        (
            c.group_id().to_string(),
            c.artifact_id().to_string(),
            c.extension().to_string(),
            c.classifier().to_string(),
            c.version().map(str::to_string),
        )
    }

    #[test]
    fn test_parse_short_form() {
        let c = Coordinate::parse("com.acme:lib").unwrap();
        assert_eq!(c.group_id(), "com.acme");
        assert_eq!(c.artifact_id(), "lib");
        assert_eq!(c.extension(), "jar");
        assert_eq!(c.classifier(), "");
        assert_eq!(c.version(), None);
    }

    #[test]
    fn test_parse_three_segments_is_version() {
        let c = Coordinate::parse("com.acme:lib:1.0").unwrap();
        assert_eq!(c.version(), Some("1.0"));
        assert_eq!(c.extension(), "jar");
        assert_eq!(c.classifier(), "");
    }

    #[test]
    fn test_parse_trailing_colon_has_no_version() {
        let c = Coordinate::parse("com.acme:lib:").unwrap();
        assert_eq!(c.version(), None);
    }

    #[test]
    fn test_parse_four_segments_fill_classifier_slot() {
        let c = Coordinate::parse("com.acme:lib:pom:tests").unwrap();
        assert_eq!(c.extension(), "pom");
        assert_eq!(c.classifier(), "tests");
        assert_eq!(c.version(), None);
    }

    #[test]
    fn test_parse_long_form() {
        let c = Coordinate::parse("com.acme:lib:zip:dist:2.1.0").unwrap();
        assert_eq!(c.extension(), "zip");
        assert_eq!(c.classifier(), "dist");
        assert_eq!(c.version(), Some("2.1.0"));
    }

    #[test]
    fn test_parse_empty_extension_keeps_default() {
        let c = Coordinate::parse("com.acme:lib::tests:1.0").unwrap();
        assert_eq!(c.extension(), "jar");
        assert_eq!(c.classifier(), "tests");
        assert_eq!(c.version(), Some("1.0"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in [
            "bad coordinate",
            "nocolon",
            "",
            ":lib",
            "com.acme:",
            "com.acme::1.0",
            "com.acme:lib::",
            "com.acme:lib:jar:",
            "com.acme:lib:jar::1.0",
            "com.acme:lib:jar:cls:",
            "com.acme:lib:jar:cls:1.0:extra",
            "com.acme:lib:1.0 ",
        ] {
            let err = Coordinate::parse(text).unwrap_err();
            assert_eq!(err.value, text);
            assert_eq!(err.key, None);
        }
    }

    #[test]
    fn test_parse_agrees_with_reference_pattern() {
        let inputs = [
            "g:a",
            "g:a:1",
            "g:a:",
            "g:a:pom:cls",
            "g:a:pom:cls:1",
            "g:a::cls",
            "g:a::cls:1",
            "g:a:x:",
            "g:a::",
            "g:a:x::1",
            "g:a:b:c:d:e",
            "g::1",
            "g a:b",
            ":",
            "g",
            "g:a:b:c:d",
            "org.springframework.boot:spring-boot-dependencies:3.2.0",
        ];

        for text in inputs {
            let expected = parse_with_pattern(text);
            let actual = Coordinate::parse(text).ok().map(|c| fields(&c));
            assert_eq!(actual, expected, "mismatch for `{}`", text);
        }
    }

    #[test]
    fn test_display_round_trips_long_form() {
        let text = "com.acme:lib:zip:dist:2.1.0";
        let c = Coordinate::parse(text).unwrap();
        assert_eq!(c.to_string(), text);

        let reparsed: Coordinate = c.to_string().parse().unwrap();
        assert_eq!(reparsed, c);
    }

    #[test]
    fn test_display_short_forms() {
        assert_eq!(Coordinate::parse("g:a").unwrap().to_string(), "g:a");
        assert_eq!(Coordinate::parse("g:a:1.0").unwrap().to_string(), "g:a:1.0");
        assert_eq!(Coordinate::parse("g:a::cls").unwrap().to_string(), "g:a:jar:cls");
    }

    #[test]
    fn test_display_drops_extension_without_classifier() {
        let c = Coordinate::new("g", "a").with_extension("zip").with_version("1.0");
        assert_eq!(c.to_string(), "g:a:1.0");

        let reparsed = Coordinate::parse(&c.to_string()).unwrap();
        assert_eq!(reparsed.extension(), DEFAULT_EXTENSION);
        assert_ne!(reparsed, c);
    }

    #[test]
    fn test_builders_normalize_empty_values() {
        let c = Coordinate::new("g", "a").with_version("").with_extension("");
        assert_eq!(c.version(), None);
        assert_eq!(c.extension(), DEFAULT_EXTENSION);
        assert_eq!(c.key(), ArtifactKey::new("g", "a"));
        assert!(c.key().matches("g", "a"));
    }
}
