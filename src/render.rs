//! Renderer interface and the offline directory renderer.
//!
//! The planner never renders anything itself: it decides which origin each
//! source is rendered from and hands a [`RenderRequest`] to a [`Renderer`].
//! The renderer returns the source's documents serialized as JSON strings.
//!
//! [`DirectoryRenderer`] is the renderer used by the command-line tool. It
//! reads the YAML/JSON manifests under a locally bound source's path and
//! refuses everything that would need a fetch.

use std::fs;
use std::path::{Component, Path, PathBuf};

use glob::Pattern;
use log::debug;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::config::{ContentSource, DirectoryOptions};
use crate::credentials::Credentials;
use crate::defaults::{LOCAL_ORIGIN_KIND, LOCAL_SCHEME, MANIFEST_EXTENSIONS};
use crate::error::{Error, Result};
use crate::phases::references::ReferenceTable;

/// The connection a source is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginOverride {
    /// The ambient working tree, addressed as `file://<root>`.
    Local { url: String, root: PathBuf },
    /// The source's own origin, with the credentials looked up for it.
    Remote {
        url: String,
        credentials: Credentials,
    },
}

impl OriginOverride {
    /// A local override for the working tree rooted at `root`.
    pub fn local(root: &Path) -> Self {
        Self::Local {
            url: format!("{}{}", LOCAL_SCHEME, to_slash(root)),
            root: root.to_path_buf(),
        }
    }

    /// A remote override for `url`.
    pub fn remote(url: &str, credentials: Credentials) -> Self {
        Self::Remote {
            url: url.to_string(),
            credentials,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Local { url, .. } | Self::Remote { url, .. } => url,
        }
    }

    /// The origin kind: `git` for local overrides, unset for remote ones.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            Self::Local { .. } => Some(LOCAL_ORIGIN_KIND),
            Self::Remote { .. } => None,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local { .. })
    }
}

fn to_slash(path: &Path) -> String {
    let path = path.to_string_lossy();
    if cfg!(windows) {
        path.replace('\\', "/")
    } else {
        path.into_owned()
    }
}

/// Everything a renderer needs for one source.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub application: &'a str,
    pub namespace: &'a str,
    pub source: &'a ContentSource,
    pub origin: &'a OriginOverride,
    pub references: &'a ReferenceTable,
    pub multi_source: bool,
}

/// Turns one source into serialized documents
pub trait Renderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Vec<String>>;
}

/// Renders plain manifest directories from the local working tree.
#[derive(Debug, Clone, Default)]
pub struct DirectoryRenderer;

impl DirectoryRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DirectoryRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Vec<String>> {
        let source = request.source;
        let root = match request.origin {
            OriginOverride::Local { root, .. } => root,
            OriginOverride::Remote { url, .. } => {
                return Err(Error::RendererUnsupported {
                    origin: url.clone(),
                    message: "remote origins are not fetched during an offline preview"
                        .to_string(),
                    hint: Some(
                        "Run the preview from a working tree whose origin remote matches this repoURL"
                            .to_string(),
                    ),
                });
            }
        };

        if source.is_registry() {
            return Err(Error::RendererUnsupported {
                origin: source.repo_url.clone(),
                message: format!(
                    "registry package '{}' cannot be rendered from a directory",
                    source.chart
                ),
                hint: None,
            });
        }

        let base = source_directory(root, source)?;
        let options = source.directory.clone().unwrap_or_default();
        debug!(
            "Rendering {} for {} from {} origin (recurse: {})",
            base.display(),
            request.application,
            request.origin.kind().unwrap_or_default(),
            options.recurse
        );

        let mut documents = Vec::new();
        for file in manifest_files(&base, &options)? {
            documents.extend(read_manifest(&file)?);
        }
        Ok(documents)
    }
}

/// Resolves the directory of `source` inside the working tree at `root`.
fn source_directory(root: &Path, source: &ContentSource) -> Result<PathBuf> {
    let relative = source.path.as_deref().unwrap_or(".");
    let escapes = Path::new(relative).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(Error::RendererUnsupported {
            origin: source.repo_url.clone(),
            message: format!("path '{}' escapes the repository root", relative),
            hint: None,
        });
    }

    let base = root.join(relative);
    if !base.is_dir() {
        return Err(Error::RendererUnsupported {
            origin: source.repo_url.clone(),
            message: format!("path '{}' is not a directory in {}", relative, root.display()),
            hint: Some("Check the source path against the checked-out working tree".to_string()),
        });
    }
    Ok(base)
}

/// Lists manifest files under `base` in path order, honoring the
/// recurse/include/exclude options.
fn manifest_files(base: &Path, options: &DirectoryOptions) -> Result<Vec<PathBuf>> {
    let include = options.include.as_deref().map(Pattern::new).transpose()?;
    let exclude = options.exclude.as_deref().map(Pattern::new).transpose()?;
    let max_depth = if options.recurse { usize::MAX } else { 1 };

    let mut files = Vec::new();
    let walker = WalkDir::new(base)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");

    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() || !has_manifest_extension(entry.path()) {
            continue;
        }

        let relative = entry.path().strip_prefix(base).unwrap_or(entry.path());
        let relative = to_slash(relative);
        if include.as_ref().is_some_and(|p| !p.matches(&relative)) {
            continue;
        }
        if exclude.as_ref().is_some_and(|p| p.matches(&relative)) {
            continue;
        }
        files.push(entry.into_path());
    }

    Ok(files)
}

fn has_manifest_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MANIFEST_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Reads every non-empty document of a manifest file as a JSON string.
fn read_manifest(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let invalid = |message: String| Error::Manifest {
        path: path.display().to_string(),
        message,
    };

    let mut documents = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(&content).enumerate() {
        let value = serde_yaml::Value::deserialize(document)
            .map_err(|e| invalid(format!("document {}: {}", index + 1, e)))?;
        if value.is_null() {
            continue;
        }
        if !value.is_mapping() {
            return Err(invalid(format!("document {} is not an object", index + 1)));
        }

        let json = serde_json::to_value(&value)
            .map_err(|e| invalid(format!("document {}: {}", index + 1, e)))?;
        documents.push(serde_json::to_string(&json)?);
    }

    Ok(documents)
}
