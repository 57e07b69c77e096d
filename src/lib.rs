//! thinpom - override-driven rewriting of Maven build manifests
//!
//! This crate takes a parsed manifest and a set of `boms.*`,
//! `dependencies.*` and `exclusions.*` overrides and produces the
//! manifest a downstream resolver should see: versions pinned, BOMs
//! imported, dependencies added, exclusions applied and the well-known
//! repositories declared.

pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

/// Test fixtures for thinpom unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    coordinate::Coordinate, dependency::Dependency, manifest::Manifest, repository::Repository,
};

pub use ops::rewrite::{rewrite, rewrite_with_report, RewriteError, RewriteReport};
pub use util::config::Overrides;
