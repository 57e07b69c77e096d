//! Manifest sources and sinks.
//!
//! The rewriter itself only works on parsed manifests; these modules read
//! them from POM or JSON files and write the rewritten result back out.

pub mod emit;
pub mod pom;

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::manifest::Manifest;

pub use emit::{to_json, to_pom_xml};
pub use pom::{parse_pom, read_pom};

/// Serialized form of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManifestFormat {
    /// Maven `pom.xml`
    #[default]
    Pom,
    /// The manifest model as JSON
    Json,
}

/// Read a manifest file in the given format.
pub fn read_manifest(path: &Path, format: ManifestFormat) -> Result<Manifest> {
    match format {
        ManifestFormat::Pom => read_pom(path),
        ManifestFormat::Json => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read manifest: {}", path.display()))?;
            Manifest::from_json(&contents)
                .with_context(|| format!("failed to parse manifest: {}", path.display()))
        }
    }
}

/// Serialize a manifest in the given format.
pub fn render_manifest(manifest: &Manifest, format: ManifestFormat) -> Result<String> {
    match format {
        ManifestFormat::Pom => to_pom_xml(manifest),
        ManifestFormat::Json => to_json(manifest),
    }
}
