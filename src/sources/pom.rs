//! POM reader.
//!
//! Reads the parts of a `pom.xml` the manifest model covers. Sections such
//! as `build`, `profiles` and `reporting` are skipped, including the
//! dependencies declared inside them. Property references (`${...}`) are
//! kept verbatim.

use std::path::Path;

use anyhow::{bail, Context, Result};
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::dependency::{Dependency, Exclusion};
use crate::core::manifest::{Manifest, Parent};
use crate::core::repository::Repository;

/// Read a POM file.
pub fn read_pom(path: &Path) -> Result<Manifest> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest: {}", path.display()))?;
    parse_pom(&contents).with_context(|| format!("failed to parse manifest: {}", path.display()))
}

/// Parse POM XML.
pub fn parse_pom(xml: &str) -> Result<Manifest> {
    let mut reader = Reader::from_str(xml);

    let mut state = PomState::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                state.start(name);
            }
            Ok(Event::Empty(ref e)) => {
                // `<relativePath/>` and friends: an element with no text.
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                state.start(name);
                state.end()?;
            }
            Ok(Event::Text(ref e)) => {
                state.text.push_str(&e.decode()?);
            }
            Ok(Event::CData(ref e)) => {
                state.text.push_str(&String::from_utf8_lossy(e));
            }
            Ok(Event::GeneralRef(ref e)) => {
                let name = e.decode()?;
                match resolve_reference(&name) {
                    Some(resolved) => state.text.push_str(&resolved),
                    None => {
                        state.text.push('&');
                        state.text.push_str(&name);
                        state.text.push(';');
                    }
                }
            }
            Ok(Event::End(_)) => state.end()?,
            Ok(Event::Eof) => break,
            Err(e) => bail!(
                "error parsing POM XML at position {}: {}",
                reader.error_position(),
                e
            ),
            _ => {}
        }
    }

    if !state.seen_project {
        bail!("document has no <project> element");
    }
    if let Some(open) = state.path.last() {
        bail!("unexpected end of document inside <{}>", open);
    }

    Ok(state.manifest)
}

/// Accumulates a manifest while walking the element tree.
#[derive(Default)]
struct PomState {
    manifest: Manifest,
    path: Vec<String>,
    text: String,
    seen_project: bool,
    parent: Option<Parent>,
    dependency: Option<Dependency>,
    exclusion: Option<Exclusion>,
    repository: Option<Repository>,
}

impl PomState {
    fn start(&mut self, name: String) {
        self.text.clear();
        self.path.push(name);

        let path: Vec<&str> = self.path.iter().map(String::as_str).collect();
        match path.as_slice() {
            ["project"] => self.seen_project = true,
            ["project", "parent"] => self.parent = Some(Parent::new("", "", "")),
            ["project", "dependencies", "dependency"]
            | ["project", "dependencyManagement", "dependencies", "dependency"] => {
                self.dependency = Some(Dependency::new("", ""));
            }
            ["project", "dependencies", "dependency", "exclusions", "exclusion"]
            | ["project", "dependencyManagement", "dependencies", "dependency", "exclusions", "exclusion"] => {
                self.exclusion = Some(Exclusion::new("", ""));
            }
            ["project", "repositories", "repository"] => {
                self.repository = Some(Repository::new("", ""));
            }
            _ => {}
        }
    }

    fn end(&mut self) -> Result<()> {
        let text = std::mem::take(&mut self.text).trim().to_string();

        let path: Vec<&str> = self.path.iter().map(String::as_str).collect();
        match path.as_slice() {
            ["project", "groupId"] => self.manifest.group_id = Some(text),
            ["project", "artifactId"] => self.manifest.artifact_id = Some(text),
            ["project", "version"] => self.manifest.version = Some(text),
            ["project", "packaging"] => self.manifest.packaging = Some(text),

            ["project", "parent", field] => {
                if let Some(parent) = self.parent.as_mut() {
                    match *field {
                        "groupId" => parent.group_id = text,
                        "artifactId" => parent.artifact_id = text,
                        "version" => parent.version = text,
                        "relativePath" => parent.relative_path = Some(text),
                        _ => {}
                    }
                }
            }
            ["project", "parent"] => {
                if let Some(parent) = self.parent.take() {
                    if parent.group_id.is_empty() || parent.artifact_id.is_empty() {
                        bail!("<parent> is missing groupId or artifactId");
                    }
                    self.manifest.parent = Some(parent);
                }
            }

            ["project", "dependencies", "dependency", "exclusions", "exclusion", field]
            | ["project", "dependencyManagement", "dependencies", "dependency", "exclusions", "exclusion", field] => {
                if let Some(exclusion) = self.exclusion.as_mut() {
                    match *field {
                        "groupId" => exclusion.group_id = text,
                        "artifactId" => exclusion.artifact_id = text,
                        _ => {}
                    }
                }
            }
            ["project", "dependencies", "dependency", "exclusions", "exclusion"]
            | ["project", "dependencyManagement", "dependencies", "dependency", "exclusions", "exclusion"] => {
                if let (Some(exclusion), Some(dependency)) =
                    (self.exclusion.take(), self.dependency.as_mut())
                {
                    dependency.add_exclusion(exclusion);
                }
            }

            ["project", "dependencies", "dependency", field]
            | ["project", "dependencyManagement", "dependencies", "dependency", field] => {
                if let Some(dependency) = self.dependency.as_mut() {
                    set_dependency_field(dependency, field, text);
                }
            }
            ["project", "dependencies", "dependency"] => {
                if let Some(dependency) = self.dependency.take() {
                    self.manifest.dependencies.push(validated(dependency)?);
                }
            }
            ["project", "dependencyManagement", "dependencies", "dependency"] => {
                if let Some(dependency) = self.dependency.take() {
                    self.manifest
                        .dependency_management_mut()
                        .dependencies
                        .push(validated(dependency)?);
                }
            }
            ["project", "dependencyManagement"] => {
                // An empty section is still a declared section.
                self.manifest.dependency_management_mut();
            }

            ["project", "repositories", "repository", policy @ ("releases" | "snapshots"), "enabled"] => {
                if let Some(repository) = self.repository.as_mut() {
                    let enabled = !text.eq_ignore_ascii_case("false");
                    if *policy == "releases" {
                        repository.releases = enabled.into();
                    } else {
                        repository.snapshots = enabled.into();
                    }
                }
            }
            ["project", "repositories", "repository", field] => {
                if let Some(repository) = self.repository.as_mut() {
                    match *field {
                        "id" => repository.id = text,
                        "name" => repository.name = Some(text),
                        "url" => repository.url = text,
                        "layout" => repository.layout = text,
                        _ => {}
                    }
                }
            }
            ["project", "repositories", "repository"] => {
                if let Some(repository) = self.repository.take() {
                    if repository.url.is_empty() {
                        bail!("<repository> `{}` has no url", repository.id);
                    }
                    self.manifest.repositories.push(repository);
                }
            }
            _ => {}
        }

        self.path.pop();
        Ok(())
    }
}

/// Resolve `&amp;`-style and `&#65;`-style references.
fn resolve_reference(name: &str) -> Option<String> {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => code.parse().ok()?,
        };
        return char::from_u32(value).map(String::from);
    }
    resolve_predefined_entity(name).map(str::to_string)
}

fn set_dependency_field(dependency: &mut Dependency, field: &str, text: String) {
    match field {
        "groupId" => dependency.group_id = text,
        "artifactId" => dependency.artifact_id = text,
        "version" => dependency.version = Some(text).filter(|v| !v.is_empty()),
        "classifier" => dependency.classifier = Some(text).filter(|v| !v.is_empty()),
        "type" if !text.is_empty() => dependency.extension = text,
        "scope" => dependency.scope = Some(text).filter(|v| !v.is_empty()),
        "optional" => dependency.optional = text.eq_ignore_ascii_case("true"),
        _ => {}
    }
}

fn validated(dependency: Dependency) -> Result<Dependency> {
    if dependency.group_id.is_empty() || dependency.artifact_id.is_empty() {
        bail!(
            "<dependency> is missing groupId or artifactId (found `{}:{}`)",
            dependency.group_id,
            dependency.artifact_id
        );
    }
    Ok(dependency)
}
