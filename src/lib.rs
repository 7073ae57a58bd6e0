//! # GitOps Preview Library
//!
//! This library previews what an Argo CD `Application` would deploy, without
//! a cluster. When a source's repository is the working tree the process runs
//! in, the preview reads that working tree at its checked-out commit instead
//! of the remote, so uncommitted manifests show up before they are pushed.
//! It is designed to be used by the `gitops-preview` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use gitops_preview::config;
//! use gitops_preview::origin;
//!
//! let descriptor = r#"
//! apiVersion: argoproj.io/v1alpha1
//! kind: Application
//! metadata:
//!   name: guestbook
//! spec:
//!   sources:
//!     - repoURL: git@github.com:argoproj/argocd-example-apps.git
//!       targetRevision: HEAD
//!       path: guestbook
//!     - repoURL: https://github.com/argoproj/argocd-example-apps
//!       targetRevision: HEAD
//!       ref: values
//! "#;
//! let apps = config::parse(descriptor).unwrap();
//! assert!(apps[0].has_multiple_sources());
//!
//! let sources = apps[0].sources();
//! assert!(origin::same_origin(&sources[0].repo_url, &sources[1].repo_url));
//! ```
//!
//! ## Core Concepts
//!
//! - **Descriptors (`config`)**: the `Application` schema and its loader.
//! - **Origins (`origin`)**: normalization and equality of repository locations.
//! - **Working tree (`repository`, `git`)**: detecting whether an origin is
//!   the ambient working tree, behind the `WorkingTreeProbe` trait.
//! - **Phases (`phases`)**: validate, resolve, build references, render.
//! - **Rendering (`render`)**: the `Renderer` trait and the offline
//!   `DirectoryRenderer`.
//! - **Projection (`projector`)**: grouping rendered documents by kind.
//! - **Presentation (`output`, `suggestions`)**: text formats and hints.
//!
//! ## Execution Flow
//!
//! The main entry point is `phases::orchestrator::generate`:
//!
//! 1.  **Validation**: multi-source applications must use a single repository
//!     (registry sources exempt).
//! 2.  **Resolution**: sources whose origin is the working tree are bound to
//!     its root and pinned to its `HEAD` commit.
//! 3.  **References**: `ref`-named sources are indexed as `$name`.
//! 4.  **Rendering**: the renderer runs once per source, in order, and the
//!     documents are concatenated.
//!
//! `projector::classify` then groups the documents for display.

pub mod config;
pub mod credentials;
pub mod defaults;
pub mod error;
pub mod git;
pub mod origin;
pub mod output;
pub mod phases;
pub mod projector;
pub mod render;
pub mod repository;
pub mod suggestions;

#[cfg(test)]
mod origin_proptest;
