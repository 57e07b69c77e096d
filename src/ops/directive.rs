//! Override directives.
//!
//! An override key is routed by its prefix: `boms.`, `dependencies.` or
//! `exclusions.`. The remainder of the key is a free-form label; the value
//! is an artifact coordinate. Keys with any other prefix are not
//! directives and are left alone.

use std::fmt;

use crate::core::coordinate::Coordinate;
use crate::util::config::Overrides;
use crate::util::diagnostic::MalformedCoordinateError;

/// What a directive does to the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// Pin or import a BOM (or override the parent version).
    Bom,
    /// Pin or add a direct dependency.
    Dependency,
    /// Exclude an artifact from every direct dependency.
    Exclusion,
}

impl DirectiveKind {
    /// Key prefixes and the directive kind each selects.
    pub const PREFIXES: &'static [(&'static str, DirectiveKind)] = &[
        ("boms.", DirectiveKind::Bom),
        ("dependencies.", DirectiveKind::Dependency),
        ("exclusions.", DirectiveKind::Exclusion),
    ];

    /// Route an override key to a directive kind.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| key.starts_with(prefix))
            .map(|(_, kind)| *kind)
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            DirectiveKind::Bom => "boms.",
            DirectiveKind::Dependency => "dependencies.",
            DirectiveKind::Exclusion => "exclusions.",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveKind::Bom => write!(f, "bom"),
            DirectiveKind::Dependency => write!(f, "dependency"),
            DirectiveKind::Exclusion => write!(f, "exclusion"),
        }
    }
}

/// A single override directive, still carrying its raw coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideDirective {
    pub kind: DirectiveKind,
    pub key: String,
    pub value: String,
}

impl OverrideDirective {
    pub fn new(kind: DirectiveKind, key: impl Into<String>, value: impl Into<String>) -> Self {
        OverrideDirective {
            kind,
            key: key.into(),
            value: value.into(),
        }
    }

    /// The label following the key prefix (`spring` in `boms.spring`).
    ///
    /// A key that does not carry its kind's prefix is returned whole.
    pub fn label(&self) -> &str {
        self.key
            .strip_prefix(self.kind.prefix())
            .unwrap_or(&self.key)
    }

    /// Parse the directive's coordinate, naming the key on failure.
    pub fn coordinate(&self) -> Result<Coordinate, MalformedCoordinateError> {
        Coordinate::parse(&self.value).map_err(|e| e.with_key(&self.key))
    }
}

/// Extract the directives from a set of overrides, in key order.
pub fn classify(overrides: &Overrides) -> Vec<OverrideDirective> {
    overrides
        .iter()
        .filter_map(|(key, value)| {
            DirectiveKind::from_key(key).map(|kind| OverrideDirective::new(kind, key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key() {
        assert_eq!(DirectiveKind::from_key("boms.spring"), Some(DirectiveKind::Bom));
        assert_eq!(
            DirectiveKind::from_key("dependencies.lib"),
            Some(DirectiveKind::Dependency)
        );
        assert_eq!(
            DirectiveKind::from_key("exclusions.bad"),
            Some(DirectiveKind::Exclusion)
        );
        assert_eq!(DirectiveKind::from_key("boms"), None);
        assert_eq!(DirectiveKind::from_key("thin.root"), None);
        assert_eq!(DirectiveKind::from_key("my.boms.x"), None);
    }

    #[test]
    fn test_classify_keeps_order_and_skips_unrelated_keys() {
        let overrides: Overrides = [
            ("exclusions.bad", "com.bad:thing"),
            ("thin.root", ""),
            ("boms.spring", "org.springframework.boot:spring-boot-dependencies:3.2.0"),
            ("dependencies.lib", "com.acme:lib:1.0"),
            ("server.port", "8080"),
        ]
        .into_iter()
        .collect();

        let directives = classify(&overrides);
        let kinds: Vec<_> = directives.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DirectiveKind::Exclusion,
                DirectiveKind::Bom,
                DirectiveKind::Dependency
            ]
        );
        assert_eq!(directives[1].label(), "spring");
        assert_eq!(directives[2].value, "com.acme:lib:1.0");
    }

    #[test]
    fn test_label_without_kind_prefix() {
        let directive = OverrideDirective::new(DirectiveKind::Dependency, "x", "g:a:1");
        assert_eq!(directive.label(), "x");

        let directive = OverrideDirective::new(DirectiveKind::Bom, "dependencies.lib", "g:a:1");
        assert_eq!(directive.label(), "dependencies.lib");

        let directive = OverrideDirective::new(DirectiveKind::Exclusion, "exclusions.", "g:a");
        assert_eq!(directive.label(), "");
    }

    #[test]
    fn test_classify_empty() {
        assert!(classify(&Overrides::new()).is_empty());
    }

    #[test]
    fn test_coordinate_error_names_key() {
        let directive = OverrideDirective::new(DirectiveKind::Dependency, "dependencies.x", "bad coordinate");
        let err = directive.coordinate().unwrap_err();

        assert_eq!(err.key.as_deref(), Some("dependencies.x"));
        assert_eq!(err.value, "bad coordinate");
    }
}
