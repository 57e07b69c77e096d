//! Well-known repository injection.
//!
//! After all directives are applied, the public release repository and the
//! snapshot repository are added to every manifest, plus a local
//! filesystem repository when the thin root marker is configured. Nothing
//! is added if a repository with the same id or url is already declared.

use crate::core::manifest::Manifest;
use crate::core::repository::{Repository, RepositoryPolicy};
use crate::util::config::{Overrides, THIN_ROOT};

pub const CENTRAL_ID: &str = "central";
pub const CENTRAL_URL: &str = "https://repo1.maven.org/maven2";

pub const SPRING_SNAPSHOTS_ID: &str = "spring-snapshots";
pub const SPRING_SNAPSHOTS_URL: &str = "https://repo.spring.io/snapshot";

/// Local repository id, only added when `thin.root` is set.
pub const LOCAL_ID: &str = "default";

/// Local repository url. `${user.home}` is left for the resolver to expand.
pub const LOCAL_URL: &str = "file:///${user.home}/repository";

/// The repositories to inject for a given set of overrides, in order.
pub fn well_known_repositories(overrides: &Overrides) -> Vec<Repository> {
    let mut repositories = vec![
        Repository::new(CENTRAL_ID, CENTRAL_URL)
            .with_releases(RepositoryPolicy::ENABLED)
            .with_snapshots(RepositoryPolicy::DISABLED),
        Repository::new(SPRING_SNAPSHOTS_ID, SPRING_SNAPSHOTS_URL)
            .with_releases(RepositoryPolicy::ENABLED)
            .with_snapshots(RepositoryPolicy::ENABLED),
    ];

    if overrides.contains_key(THIN_ROOT) {
        repositories.push(
            Repository::new(LOCAL_ID, LOCAL_URL)
                .with_releases(RepositoryPolicy::ENABLED)
                .with_snapshots(RepositoryPolicy::ENABLED),
        );
    }

    repositories
}

/// Append `candidate` unless a repository with the same url or id exists.
///
/// Returns `true` if the repository was added.
pub fn add_repository_if_missing(manifest: &mut Manifest, candidate: Repository) -> bool {
    if let Some(existing) = manifest.repositories.iter().find(|r| r.same_as(&candidate)) {
        tracing::debug!(
            "repository `{}` already covered by `{}` ({})",
            candidate.id,
            existing.id,
            existing.url
        );
        return false;
    }

    manifest.repositories.push(candidate);
    true
}

/// Inject the well-known repositories, returning the ids that were added.
pub fn inject_repositories(manifest: &mut Manifest, overrides: &Overrides) -> Vec<String> {
    let mut added = Vec::new();
    for repository in well_known_repositories(overrides) {
        let id = repository.id.clone();
        if add_repository_if_missing(manifest, repository) {
            added.push(id);
        }
    }
    added
}
