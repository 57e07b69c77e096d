//! High-level operations.
//!
//! This module contains the override rewrite and the steps it is built
//! from: classifying directives, merging them into the manifest, and
//! injecting repositories.

pub mod directive;
pub mod merge;
pub mod repositories;
pub mod rewrite;

pub use directive::{classify, DirectiveKind, OverrideDirective};
pub use merge::{apply_bom, apply_dependency, apply_exclusion, MergeEffect, PARENT_BOM_ALIASES};
pub use repositories::{add_repository_if_missing, inject_repositories};
pub use rewrite::{
    rewrite, rewrite_in_place, rewrite_with_report, DirectiveOutcome, RewriteError, RewriteReport,
};
