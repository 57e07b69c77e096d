//! Core data structures for thinpom.
//!
//! This module contains the manifest model the rewriter operates on:
//! - Artifact coordinates and their parser
//! - Dependencies and exclusions
//! - Manifests, parents and dependency management
//! - Repositories

pub mod coordinate;
pub mod dependency;
pub mod manifest;
pub mod repository;

pub use coordinate::{ArtifactKey, Coordinate};
pub use dependency::{Dependency, Exclusion};
pub use manifest::{DependencyManagement, Manifest, Parent};
pub use repository::{Repository, RepositoryPolicy};
