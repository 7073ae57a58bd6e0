//! # Deployment Descriptor Schema and Parsing
//!
//! This module defines the data structures for the Application descriptors
//! the tool previews, and the logic for loading them from YAML.
//!
//! ## Key Components
//!
//! - **`Application`**: One deployment descriptor, with its metadata and
//!   spec. A descriptor file may hold several, as separate YAML documents.
//!
//! - **`ContentSource`**: One location in version control (or one package in
//!   a registry) that contributes rendered resources. An application names
//!   either a single `source` or a list of `sources`; `Application::sources`
//!   normalizes both into a list.
//!
//! ## Parsing
//!
//! `parse` reads every YAML document in the input, skips empty ones, and
//! rejects documents whose `kind` is set to anything but `Application`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// API version stamped on applications when they are printed.
pub const APPLICATION_API_VERSION: &str = "argoproj.io/v1alpha1";

/// Kind of the only document type accepted in descriptor files.
pub const APPLICATION_KIND: &str = "Application";

/// Directory scanning options of a source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryOptions {
    /// Scan subdirectories of the source path as well.
    #[serde(default)]
    pub recurse: bool,
    /// Glob pattern, relative to the source path, selecting files to render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    /// Glob pattern, relative to the source path, selecting files to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
}

/// One content source of an application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSource {
    /// Origin location: a repository URL, SSH shorthand, or registry URL.
    #[serde(rename = "repoURL", default)]
    pub repo_url: String,
    /// Branch, tag or commit to render.
    #[serde(default)]
    pub target_revision: String,
    /// Repository-relative path of the content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Package name; non-empty only for registry sources.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chart: String,
    /// Name under which other sources address this one (`$name/...`).
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
    /// Options for plain directory sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<DirectoryOptions>,
}

impl ContentSource {
    /// Creates a repository source.
    pub fn new(repo_url: &str, target_revision: &str) -> Self {
        Self {
            repo_url: repo_url.to_string(),
            target_revision: target_revision.to_string(),
            ..Default::default()
        }
    }

    /// Creates a registry source for package `chart`.
    pub fn registry(repo_url: &str, chart: &str, target_revision: &str) -> Self {
        Self {
            chart: chart.to_string(),
            ..Self::new(repo_url, target_revision)
        }
    }

    /// Sets the repository-relative path.
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    /// Sets the reference name.
    pub fn with_ref(mut self, ref_name: &str) -> Self {
        self.ref_name = Some(ref_name.to_string());
        self
    }

    /// A registry source names a package rather than a repository path.
    pub fn is_registry(&self) -> bool {
        !self.chart.is_empty()
    }

    /// The reference name, if set and non-empty.
    pub fn reference_name(&self) -> Option<&str> {
        self.ref_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Application metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Where the rendered resources would be deployed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub namespace: String,
}

/// Application spec
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ContentSource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<ContentSource>,
    #[serde(default)]
    pub destination: Destination,
}

/// A deployment descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub spec: ApplicationSpec,
}

impl Application {
    /// Creates an application with a single source.
    pub fn with_source(name: &str, source: ContentSource) -> Self {
        let mut app = Self::named(name);
        app.spec.source = Some(source);
        app
    }

    /// Creates an application with a list of sources.
    pub fn with_sources(name: &str, sources: Vec<ContentSource>) -> Self {
        let mut app = Self::named(name);
        app.spec.sources = sources;
        app
    }

    fn named(name: &str) -> Self {
        Self {
            metadata: Metadata {
                name: name.to_string(),
                namespace: None,
            },
            ..Default::default()
        }
    }

    /// The application name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// The destination namespace.
    pub fn namespace(&self) -> &str {
        &self.spec.destination.namespace
    }

    /// Returns the sources as a list.
    ///
    /// `spec.sources` wins when non-empty; otherwise `spec.source` becomes a
    /// one-element list. Applications with neither yield an empty list.
    pub fn sources(&self) -> Vec<ContentSource> {
        if !self.spec.sources.is_empty() {
            return self.spec.sources.clone();
        }
        self.spec.source.iter().cloned().collect()
    }

    /// True when the application renders more than one source.
    pub fn has_multiple_sources(&self) -> bool {
        self.sources().len() > 1
    }

    /// A copy with `apiVersion` and `kind` filled in, for printing.
    pub fn with_type_meta(&self) -> Self {
        let mut app = self.clone();
        app.api_version = Some(APPLICATION_API_VERSION.to_string());
        app.kind = Some(APPLICATION_KIND.to_string());
        app
    }
}

/// Parses every Application document in `content`.
pub fn parse(content: &str) -> Result<Vec<Application>> {
    let mut apps = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = serde_yaml::Value::deserialize(document).map_err(|e| Error::ConfigParse {
            message: format!("document {} is not valid YAML: {}", index + 1, e),
            hint: None,
        })?;
        if value.is_null() {
            continue;
        }

        let app: Application =
            serde_yaml::from_value(value).map_err(|e| Error::ConfigParse {
                message: format!("document {} is not a valid Application: {}", index + 1, e),
                hint: Some(
                    "Check the field names under .spec.source / .spec.sources (repoURL, targetRevision, path, chart, ref)"
                        .to_string(),
                ),
            })?;

        if let Some(kind) = app.kind.as_deref() {
            if kind != APPLICATION_KIND {
                return Err(Error::ConfigParse {
                    message: format!("document {} has kind '{}'", index + 1, kind),
                    hint: Some("Only Application documents can be previewed".to_string()),
                });
            }
        }

        apps.push(app);
    }

    Ok(apps)
}

/// Reads and parses a descriptor file.
pub fn from_file(path: &Path) -> Result<Vec<Application>> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}
