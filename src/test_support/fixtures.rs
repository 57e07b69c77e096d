//! Manifest fixtures for common test scenarios.

use crate::core::coordinate::Coordinate;
use crate::core::dependency::Dependency;
use crate::core::manifest::{Manifest, Parent};
use crate::core::repository::Repository;

/// Builder for test manifests.
#[derive(Debug, Clone, Default)]
pub struct ManifestFixture {
    manifest: Manifest,
}

impl ManifestFixture {
    /// Create a new empty manifest fixture.
    pub fn new() -> Self {
        ManifestFixture::default()
    }

    /// Create a fixture with one direct dependency per coordinate.
    ///
    /// Panics if a coordinate is malformed.
    pub fn with_dependencies(coordinates: &[&str]) -> Self {
        coordinates
            .iter()
            .fold(ManifestFixture::new(), |fixture, text| {
                let coordinate = Coordinate::parse(text).unwrap();
                fixture.dependency(Dependency::from_coordinate(&coordinate))
            })
    }

    /// Set the project's own coordinates.
    pub fn project(mut self, group_id: &str, artifact_id: &str, version: &str) -> Self {
        self.manifest.group_id = Some(group_id.to_string());
        self.manifest.artifact_id = Some(artifact_id.to_string());
        self.manifest.version = Some(version.to_string());
        self
    }

    /// Set the parent.
    pub fn parent(mut self, group_id: &str, artifact_id: &str, version: &str) -> Self {
        self.manifest.parent = Some(Parent::new(group_id, artifact_id, version));
        self
    }

    /// Add a direct dependency.
    pub fn dependency(mut self, dependency: Dependency) -> Self {
        self.manifest.dependencies.push(dependency);
        self
    }

    /// Add a dependency-management entry.
    pub fn managed(mut self, dependency: Dependency) -> Self {
        self.manifest
            .dependency_management_mut()
            .dependencies
            .push(dependency);
        self
    }

    /// Add a repository.
    pub fn repository(mut self, repository: Repository) -> Self {
        self.manifest.repositories.push(repository);
        self
    }

    pub fn build(self) -> Manifest {
        self.manifest
    }
}

/// A Spring Boot application POM, as generated by a project initializer.
pub const SPRING_BOOT_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <parent>
    <groupId>org.springframework.boot</groupId>
    <artifactId>spring-boot-starter-parent</artifactId>
    <version>3.1.0</version>
  </parent>
  <groupId>com.example</groupId>
  <artifactId>demo</artifactId>
  <version>0.0.1-SNAPSHOT</version>
  <dependencies>
    <dependency>
      <groupId>org.springframework.boot</groupId>
      <artifactId>spring-boot-starter-web</artifactId>
    </dependency>
    <dependency>
      <groupId>com.acme</groupId>
      <artifactId>lib</artifactId>
      <version>2.0</version>
    </dependency>
  </dependencies>
</project>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::pom::parse_pom;

    #[test]
    fn test_with_dependencies() {
        let manifest = ManifestFixture::with_dependencies(&["g:a:1.0", "g:b"]).build();
        assert_eq!(manifest.dependencies.len(), 2);
        assert_eq!(manifest.dependencies[1].version, None);
    }

    #[test]
    fn test_spring_boot_pom_parses() {
        let manifest = parse_pom(SPRING_BOOT_POM).unwrap();
        assert_eq!(manifest.dependencies.len(), 2);
        assert_eq!(
            manifest.parent.unwrap().artifact_id,
            "spring-boot-starter-parent"
        );
    }
}
