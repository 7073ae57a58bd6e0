//! # Error Handling
//!
//! This module defines the centralized error type for the `gitops-preview`
//! library. It uses the `thiserror` library to create a single `Error` enum
//! covering every failure mode of a preview pass, each variant carrying
//! enough context (source index, literal origin, offending path) for the
//! message to be actionable on its own.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Variants group into:
//!   - configuration errors (`ConfigParse`, `NoSource`);
//!   - constraint violations (`EmptyOrigin`, `OriginMismatch`);
//!   - working-tree probing (`EnvironmentProbe`, `RevisionResolution`,
//!     `GitCommand`);
//!   - rendering (`Rendering`, `RendererUnsupported`, `Manifest`);
//!   - projection (`MalformedDocument`);
//!   - wrapped library errors (`Io`, `Yaml`, `Json`, `Glob`).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! `RevisionResolution` is the only variant that is expected to be handled
//! rather than propagated: the resolution phase logs it and keeps the
//! original revision selector.

use thiserror::Error;

/// Main error type for gitops-preview operations
#[derive(Error, Debug)]
pub enum Error {
    /// The deployment descriptor could not be parsed.
    ///
    /// Includes the specific parsing issue and optionally a hint about how
    /// to fix it.
    #[error("Descriptor parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the descriptor
        hint: Option<String>,
    },

    /// The application has no usable source (`.spec.source` or `.spec.sources`).
    #[error("Application '{application}' has no valid source configured (.spec.source or .spec.sources)")]
    NoSource { application: String },

    /// A source in a multi-source application has an empty origin.
    #[error("Source at index {index} has empty repoURL")]
    EmptyOrigin { index: usize },

    /// Two non-registry sources point at different origins.
    #[error(
        "All Git repository sources must use the same repository. \
         Source at index {index} uses '{origin}' but source at index {first_index} \
         (first Git source) uses '{first_origin}'"
    )]
    OriginMismatch {
        index: usize,
        origin: String,
        first_index: usize,
        first_origin: String,
    },

    /// The origin matched the current working tree but its root could not
    /// be resolved.
    #[error("Working tree matches {origin} but its root could not be resolved: {message}")]
    EnvironmentProbe { origin: String, message: String },

    /// The checked-out revision of a working tree could not be resolved.
    #[error("Failed to resolve HEAD in {path}: {message}")]
    RevisionResolution { path: String, message: String },

    /// A `git` invocation failed.
    #[error("Git command failed in {dir}: {command} - {stderr}")]
    GitCommand {
        command: String,
        dir: String,
        stderr: String,
    },

    /// The renderer failed for one source; the whole pass is aborted.
    #[error("Failed to render source {index}: {source}")]
    Rendering {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// The renderer cannot handle the given source.
    #[error("Cannot render {origin}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    RendererUnsupported {
        origin: String,
        message: String,
        hint: Option<String>,
    },

    /// A manifest file read by the renderer is not valid.
    #[error("Invalid manifest {path}: {message}")]
    Manifest { path: String, message: String },

    /// A rendered document could not be parsed as a structured object.
    #[error("Malformed rendered document at index {index}: {message}")]
    MalformedDocument { index: usize, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
