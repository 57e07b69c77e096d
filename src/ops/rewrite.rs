//! Implementation of the manifest rewrite.
//!
//! A rewrite applies every override directive, in key order, to the
//! manifest and then injects the well-known repositories. A malformed
//! coordinate stops the rewrite at that directive; changes made by earlier
//! directives are kept and repositories are not injected.

use thiserror::Error;

use crate::core::dependency::Exclusion;
use crate::core::manifest::Manifest;
use crate::ops::directive::{classify, DirectiveKind, OverrideDirective};
use crate::ops::merge::{apply_bom, apply_dependency, apply_exclusion, MergeEffect};
use crate::ops::repositories::inject_repositories;
use crate::util::config::Overrides;
use crate::util::diagnostic::{suggestions, Diagnostic, MalformedCoordinateError};

/// Error during a rewrite.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error(transparent)]
    MalformedCoordinate(#[from] MalformedCoordinateError),
}

impl RewriteError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            RewriteError::MalformedCoordinate(err) => err
                .to_diagnostic()
                .with_suggestion(suggestions::VERBOSE),
        }
    }
}

/// What one directive did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveOutcome {
    pub kind: DirectiveKind,
    pub key: String,
    pub coordinate: String,
    pub effect: MergeEffect,
}

impl DirectiveOutcome {
    /// A warning for a directive that was ignored outright.
    ///
    /// Only dependency directives without a version qualify; an exclusion
    /// with nothing to exclude from is not worth reporting.
    pub fn warning(&self) -> Option<Diagnostic> {
        match (self.kind, self.effect) {
            (DirectiveKind::Dependency, MergeEffect::Skipped) => Some(
                Diagnostic::warning(format!(
                    "dependency override `{}` has no version and was ignored",
                    self.key
                ))
                .with_context(format!("coordinate is `{}`", self.coordinate))
                .with_suggestion(suggestions::ADD_VERSION),
            ),
            _ => None,
        }
    }
}

/// Record of a completed rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// One entry per directive, in the order applied
    pub directives: Vec<DirectiveOutcome>,
    /// Ids of the repositories that were added
    pub repositories_added: Vec<String>,
}

impl RewriteReport {
    /// Number of directives that changed the manifest.
    pub fn changed(&self) -> usize {
        self.directives
            .iter()
            .filter(|d| d.effect != MergeEffect::Skipped)
            .count()
    }
}

/// Rewrite a manifest according to a set of overrides.
pub fn rewrite(manifest: Manifest, overrides: &Overrides) -> Result<Manifest, RewriteError> {
    rewrite_with_report(manifest, overrides).map(|(manifest, _)| manifest)
}

/// Rewrite a manifest, also returning what each directive did.
pub fn rewrite_with_report(
    mut manifest: Manifest,
    overrides: &Overrides,
) -> Result<(Manifest, RewriteReport), RewriteError> {
    let report = rewrite_in_place(&mut manifest, overrides)?;
    Ok((manifest, report))
}

/// Rewrite a manifest in place.
///
/// On error the manifest keeps the changes of the directives applied before
/// the failing one.
pub fn rewrite_in_place(
    manifest: &mut Manifest,
    overrides: &Overrides,
) -> Result<RewriteReport, RewriteError> {
    let mut report = RewriteReport::default();

    // Exclusions seen so far, so dependencies appended after an exclusion
    // directive still end up excluding it.
    let mut exclusions: Vec<Exclusion> = Vec::new();

    for directive in classify(overrides) {
        let outcome = apply_directive(manifest, &directive, &mut exclusions)?;
        tracing::debug!(
            "{} `{}` = `{}`: {}",
            outcome.kind,
            outcome.key,
            outcome.coordinate,
            outcome.effect
        );
        report.directives.push(outcome);
    }

    report.repositories_added = inject_repositories(manifest, overrides);

    tracing::info!(
        "Applied {} override directives ({} changed the manifest), added {} repositories",
        report.directives.len(),
        report.changed(),
        report.repositories_added.len()
    );

    Ok(report)
}

fn apply_directive(
    manifest: &mut Manifest,
    directive: &OverrideDirective,
    exclusions: &mut Vec<Exclusion>,
) -> Result<DirectiveOutcome, RewriteError> {
    let coordinate = directive.coordinate()?;

    let effect = match directive.kind {
        DirectiveKind::Bom => apply_bom(manifest, &coordinate),
        DirectiveKind::Dependency => apply_dependency(manifest, &coordinate, exclusions),
        DirectiveKind::Exclusion => {
            let exclusion = coordinate.key();
            if !exclusions.contains(&exclusion) {
                exclusions.push(exclusion);
            }
            apply_exclusion(manifest, &coordinate)
        }
    };

    Ok(DirectiveOutcome {
        kind: directive.kind,
        key: directive.key.clone(),
        coordinate: directive.value.clone(),
        effect,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dependency::Dependency;
    use crate::sources::pom::parse_pom;
    use crate::test_support::{ManifestFixture, SPRING_BOOT_POM};
    use crate::util::config::THIN_ROOT;

    fn overrides(pairs: &[(&str, &str)]) -> Overrides {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_rewrite_applies_all_directive_kinds() {
        let manifest = ManifestFixture::with_dependencies(&["com.acme:lib:2.0", "com.acme:util:1.0"])
            .parent("com.acme", "parent", "1.0")
            .build();

        let (manifest, report) = rewrite_with_report(
            manifest,
            &overrides(&[
                ("boms.acme", "com.acme:bom:1.0"),
                ("dependencies.lib", "com.acme:lib:3.0"),
                ("dependencies.new", "com.acme:new:1.0"),
                ("exclusions.bad", "com.bad:thing"),
                ("unrelated.key", "whatever"),
            ]),
        )
        .unwrap();

        let effects: Vec<_> = report.directives.iter().map(|d| d.effect).collect();
        assert_eq!(
            effects,
            vec![
                MergeEffect::Appended,
                MergeEffect::Pinned,
                MergeEffect::Appended,
                MergeEffect::Excluded(3),
            ]
        );
        assert_eq!(report.repositories_added, vec!["central", "spring-snapshots"]);

        assert_eq!(manifest.dependencies.len(), 3);
        assert_eq!(
            manifest.dependency("com.acme", "lib").unwrap().version.as_deref(),
            Some("3.0")
        );
        assert!(manifest.managed_dependency("com.acme", "bom").unwrap().is_bom_import());
        assert_eq!(manifest.parent.as_ref().unwrap().version, "1.0");
    }

    #[test]
    fn test_rewrite_spring_boot_project() {
        let manifest = parse_pom(SPRING_BOOT_POM).unwrap();

        let rewritten = rewrite(
            manifest,
            &overrides(&[
                ("boms.spring", "org.springframework.boot:spring-boot-dependencies:3.2.0"),
                ("dependencies.web", "org.springframework.boot:spring-boot-starter-web:3.2.0"),
                ("exclusions.logging", "org.springframework.boot:spring-boot-starter-logging"),
            ]),
        )
        .unwrap();

        assert_eq!(rewritten.parent.as_ref().unwrap().version, "3.2.0");
        assert!(rewritten.dependency_management.is_none());
        let web = rewritten
            .dependency("org.springframework.boot", "spring-boot-starter-web")
            .unwrap();
        assert_eq!(web.version.as_deref(), Some("3.2.0"));
        assert!(rewritten
            .dependencies
            .iter()
            .all(|d| d.has_exclusion("org.springframework.boot", "spring-boot-starter-logging")));
        assert_eq!(
            rewritten.dependency("com.acme", "lib").unwrap().version.as_deref(),
            Some("2.0")
        );
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let manifest = ManifestFixture::with_dependencies(&["com.acme:lib:2.0"])
            .parent("org.springframework.boot", "spring-boot-starter-parent", "3.1.0")
            .build();
        let overrides = overrides(&[
            ("exclusions.bad", "com.bad:thing"),
            ("boms.spring", "org.springframework.boot:spring-boot-dependencies:3.2.0"),
            ("boms.cloud", "org.springframework.cloud:spring-cloud-dependencies:2023.0.0"),
            ("dependencies.lib", "com.acme:lib:3.0"),
            ("dependencies.new", "com.acme:new:1.0"),
            (THIN_ROOT, ""),
        ]);

        let once = rewrite(manifest, &overrides).unwrap();
        let twice = rewrite(once.clone(), &overrides).unwrap();

        assert_eq!(once, twice);
        assert!(once
            .dependencies
            .iter()
            .all(|d| d.has_exclusion("com.bad", "thing")));
        assert_eq!(once.parent.as_ref().unwrap().version, "3.2.0");
        assert_eq!(once.dependency_management.as_ref().unwrap().dependencies.len(), 1);
        assert_eq!(once.repositories.len(), 3);
    }

    #[test]
    fn test_malformed_coordinate_keeps_earlier_changes() {
        let mut manifest = ManifestFixture::with_dependencies(&["com.acme:lib:2.0"]).build();

        let err = rewrite_in_place(
            &mut manifest,
            &overrides(&[
                ("dependencies.lib", "com.acme:lib:3.0"),
                ("dependencies.x", "bad coordinate"),
                ("dependencies.late", "com.acme:late:1.0"),
            ]),
        )
        .unwrap_err();

        let RewriteError::MalformedCoordinate(inner) = &err;
        assert_eq!(inner.key.as_deref(), Some("dependencies.x"));
        assert_eq!(inner.value, "bad coordinate");

        assert_eq!(
            manifest.dependency("com.acme", "lib").unwrap().version.as_deref(),
            Some("3.0")
        );
        assert!(manifest.dependency("com.acme", "late").is_none());
        assert!(manifest.repositories.is_empty());
    }

    #[test]
    fn test_rewrite_error_diagnostic() {
        let err = rewrite(Manifest::new(), &overrides(&[("boms.x", "nope")])).unwrap_err();
        let output = err.to_diagnostic().format(false);

        assert!(output.contains("bad artifact coordinates `nope`"));
        assert!(output.contains("read from override `boms.x`"));
        assert!(output.contains("--verbose"));
    }

    #[test]
    fn test_versionless_dependency_outcome_warns() {
        let manifest = ManifestFixture::with_dependencies(&["com.acme:lib:2.0"]).build();

        let (manifest, report) = rewrite_with_report(
            manifest,
            &overrides(&[
                ("dependencies.lib", "com.acme:lib"),
                ("exclusions.bad", "com.bad:thing"),
            ]),
        )
        .unwrap();

        assert_eq!(
            manifest.dependency("com.acme", "lib").unwrap().version.as_deref(),
            Some("2.0")
        );
        let warning = report.directives[0].warning().unwrap().format(false);
        assert!(warning.starts_with("warning: dependency override `dependencies.lib`"));
        assert!(warning.contains("coordinate is `com.acme:lib`"));
        assert!(report.directives[1].warning().is_none());
    }

    #[test]
    fn test_empty_overrides_only_add_repositories() {
        let manifest = ManifestFixture::new()
            .dependency(Dependency::new("com.acme", "lib").with_version("1.0"))
            .build();

        let (rewritten, report) = rewrite_with_report(manifest.clone(), &Overrides::new()).unwrap();

        assert!(report.directives.is_empty());
        assert_eq!(rewritten.dependencies, manifest.dependencies);
        assert!(rewritten.dependency_management.is_none());
        assert_eq!(rewritten.repositories.len(), 2);
    }
}
