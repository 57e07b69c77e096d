//! Applying directives to a manifest.
//!
//! Each function applies one parsed coordinate and reports what it did.
//! All three are idempotent: applying the same coordinate twice leaves the
//! manifest as applying it once.

use std::fmt;

use crate::core::coordinate::Coordinate;
use crate::core::dependency::{Dependency, Exclusion};
use crate::core::manifest::{Manifest, Parent};

/// A parent artifact whose version is governed by a differently named BOM.
///
/// A BOM override naming `bom_artifact_id` on a manifest whose parent is
/// `parent_artifact_id` retargets the parent version instead of importing
/// the BOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentBomAlias {
    pub parent_artifact_id: &'static str,
    pub bom_artifact_id: &'static str,
}

pub const PARENT_BOM_ALIASES: &[ParentBomAlias] = &[ParentBomAlias {
    parent_artifact_id: "spring-boot-starter-parent",
    bom_artifact_id: "spring-boot-dependencies",
}];

/// The effect of applying one directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeEffect {
    /// The parent's version was overridden.
    ParentVersion,
    /// Existing entries had their version overwritten.
    Pinned,
    /// A new entry was appended.
    Appended,
    /// The exclusion was added to this many dependencies.
    Excluded(usize),
    /// The directive had nothing to act on.
    Skipped,
}

impl fmt::Display for MergeEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeEffect::ParentVersion => write!(f, "overrode parent version"),
            MergeEffect::Pinned => write!(f, "pinned version"),
            MergeEffect::Appended => write!(f, "appended"),
            MergeEffect::Excluded(n) => write!(f, "excluded from {} dependencies", n),
            MergeEffect::Skipped => write!(f, "skipped"),
        }
    }
}

/// Check whether a BOM coordinate governs the manifest's parent.
pub fn is_parent_bom(parent: &Parent, coordinate: &Coordinate) -> bool {
    if parent.group_id == coordinate.group_id() && parent.artifact_id == coordinate.artifact_id() {
        return true;
    }

    PARENT_BOM_ALIASES.iter().any(|alias| {
        parent.artifact_id == alias.parent_artifact_id
            && coordinate.artifact_id() == alias.bom_artifact_id
    })
}

/// Apply a BOM directive.
///
/// If the BOM governs the parent, only the parent version changes (and only
/// when the coordinate carries a version). Otherwise a matching
/// dependency-management entry is re-versioned, or a `pom`/`import` entry is
/// appended.
pub fn apply_bom(manifest: &mut Manifest, coordinate: &Coordinate) -> MergeEffect {
    if let Some(parent) = manifest.parent.as_mut() {
        if is_parent_bom(parent, coordinate) {
            if let Some(version) = coordinate.version() {
                parent.version = version.to_string();
            }
            return MergeEffect::ParentVersion;
        }
    }

    let management = manifest.dependency_management_mut();
    let mut pinned = false;
    for dependency in management
        .dependencies
        .iter_mut()
        .filter(|d| d.matches(coordinate))
    {
        dependency.version = coordinate.version().map(str::to_string);
        pinned = true;
    }

    if pinned {
        MergeEffect::Pinned
    } else {
        management.dependencies.push(Dependency::bom(coordinate));
        MergeEffect::Appended
    }
}

/// Apply a dependency directive.
///
/// Without a version the directive does nothing. With one, every direct
/// dependency with the same group and artifact takes that version; if none
/// exists, a new dependency is appended carrying `inherited_exclusions`.
pub fn apply_dependency(
    manifest: &mut Manifest,
    coordinate: &Coordinate,
    inherited_exclusions: &[Exclusion],
) -> MergeEffect {
    let Some(version) = coordinate.version() else {
        return MergeEffect::Skipped;
    };

    let mut pinned = false;
    for dependency in manifest
        .dependencies
        .iter_mut()
        .filter(|d| d.matches(coordinate))
    {
        dependency.version = Some(version.to_string());
        pinned = true;
    }

    if pinned {
        return MergeEffect::Pinned;
    }

    let mut dependency = Dependency::from_coordinate(coordinate);
    for exclusion in inherited_exclusions {
        dependency.add_exclusion(exclusion.clone());
    }
    manifest.dependencies.push(dependency);
    MergeEffect::Appended
}

/// Apply an exclusion directive.
///
/// The exclusion is global: it is added to every direct dependency in the
/// manifest, not to one named dependency. Dependencies that already carry
/// it are left alone.
pub fn apply_exclusion(manifest: &mut Manifest, coordinate: &Coordinate) -> MergeEffect {
    let exclusion = coordinate.key();
    let added = manifest
        .dependencies
        .iter_mut()
        .map(|d| d.add_exclusion(exclusion.clone()))
        .filter(|added| *added)
        .count();

    if added == 0 {
        MergeEffect::Skipped
    } else {
        MergeEffect::Excluded(added)
    }
}
