//! Writing rewritten manifests.

use std::io::Write;

use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::core::dependency::Dependency;
use crate::core::manifest::Manifest;
use crate::core::repository::{Repository, RepositoryPolicy};

const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

/// Serialize a manifest as pretty-printed JSON.
pub fn to_json(manifest: &Manifest) -> Result<String> {
    serde_json::to_string_pretty(manifest).context("failed to serialize manifest as JSON")
}

/// Serialize a manifest as POM XML.
///
/// Only the sections of the manifest model are written.
pub fn to_pom_xml(manifest: &Manifest) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut project = BytesStart::new("project");
    project.push_attribute(("xmlns", POM_NAMESPACE));
    writer.write_event(Event::Start(project))?;

    text_element(&mut writer, "modelVersion", "4.0.0")?;

    if let Some(parent) = &manifest.parent {
        start(&mut writer, "parent")?;
        text_element(&mut writer, "groupId", &parent.group_id)?;
        text_element(&mut writer, "artifactId", &parent.artifact_id)?;
        text_element(&mut writer, "version", &parent.version)?;
        optional_element(&mut writer, "relativePath", parent.relative_path.as_deref())?;
        end(&mut writer, "parent")?;
    }

    optional_element(&mut writer, "groupId", manifest.group_id.as_deref())?;
    optional_element(&mut writer, "artifactId", manifest.artifact_id.as_deref())?;
    optional_element(&mut writer, "version", manifest.version.as_deref())?;
    optional_element(&mut writer, "packaging", manifest.packaging.as_deref())?;

    if !manifest.dependencies.is_empty() {
        write_dependencies(&mut writer, &manifest.dependencies)?;
    }

    if let Some(management) = &manifest.dependency_management {
        start(&mut writer, "dependencyManagement")?;
        write_dependencies(&mut writer, &management.dependencies)?;
        end(&mut writer, "dependencyManagement")?;
    }

    if !manifest.repositories.is_empty() {
        start(&mut writer, "repositories")?;
        for repository in &manifest.repositories {
            write_repository(&mut writer, repository)?;
        }
        end(&mut writer, "repositories")?;
    }

    end(&mut writer, "project")?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).context("POM output is not valid UTF-8")
}

fn write_dependencies<W: Write>(writer: &mut Writer<W>, dependencies: &[Dependency]) -> Result<()> {
    start(writer, "dependencies")?;
    for dependency in dependencies {
        start(writer, "dependency")?;
        text_element(writer, "groupId", &dependency.group_id)?;
        text_element(writer, "artifactId", &dependency.artifact_id)?;
        optional_element(writer, "version", dependency.version.as_deref())?;
        optional_element(writer, "classifier", dependency.classifier.as_deref())?;
        if dependency.extension != "jar" {
            text_element(writer, "type", &dependency.extension)?;
        }
        optional_element(writer, "scope", dependency.scope.as_deref())?;
        if dependency.optional {
            text_element(writer, "optional", "true")?;
        }
        if !dependency.exclusions.is_empty() {
            start(writer, "exclusions")?;
            for exclusion in &dependency.exclusions {
                start(writer, "exclusion")?;
                text_element(writer, "groupId", &exclusion.group_id)?;
                text_element(writer, "artifactId", &exclusion.artifact_id)?;
                end(writer, "exclusion")?;
            }
            end(writer, "exclusions")?;
        }
        end(writer, "dependency")?;
    }
    end(writer, "dependencies")
}

fn write_repository<W: Write>(writer: &mut Writer<W>, repository: &Repository) -> Result<()> {
    start(writer, "repository")?;
    text_element(writer, "id", &repository.id)?;
    optional_element(writer, "name", repository.name.as_deref())?;
    text_element(writer, "url", &repository.url)?;
    text_element(writer, "layout", &repository.layout)?;
    write_policy(writer, "releases", repository.releases)?;
    write_policy(writer, "snapshots", repository.snapshots)?;
    end(writer, "repository")
}

fn write_policy<W: Write>(writer: &mut Writer<W>, name: &str, policy: RepositoryPolicy) -> Result<()> {
    start(writer, name)?;
    text_element(writer, "enabled", if policy.enabled { "true" } else { "false" })?;
    end(writer, name)
}

fn start<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    start(writer, name)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end(writer, name)
}

fn optional_element<W: Write>(writer: &mut Writer<W>, name: &str, text: Option<&str>) -> Result<()> {
    match text {
        Some(text) => text_element(writer, name, text),
        None => Ok(()),
    }
}
