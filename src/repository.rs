//! # Local Working-Tree Detection
//!
//! This module provides the `LocalOriginDetector`, which decides whether a
//! content source's origin is the working tree the tool is running in and,
//! if so, where that tree lives on disk.
//!
//! ## Design
//!
//! The detector is built around the `WorkingTreeProbe` trait, which captures
//! the three read-only questions asked of the ambient working tree:
//!
//! - **`remote_location`**: the configured primary remote.
//! - **`root_path`**: the top-level directory of the tree.
//! - **`revision`**: the commit currently checked out.
//!
//! In the application, `GitWorkingTree` answers them by shelling out to
//! `git`. In tests, a fake probe is injected so that matching, non-matching
//! and broken environments can be simulated without a real repository.
//!
//! Two failure modes are kept apart. Not being inside a tree, or
//! having no remote, means "not local" and is never an error. Matching the
//! remote but failing to resolve the root is an environment problem and is
//! reported as `Error::EnvironmentProbe`.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::origin;

/// Trait for working-tree inspection - allows faking in tests
pub trait WorkingTreeProbe {
    /// Returns the configured primary remote location of the current tree.
    ///
    /// An error means there is no usable remote (not inside a tree, or no
    /// remote configured).
    fn remote_location(&self) -> Result<String>;

    /// Returns the absolute top-level directory of the current tree.
    fn root_path(&self) -> Result<PathBuf>;

    /// Returns the commit identifier checked out in the tree at `root`.
    fn revision(&self, root: &Path) -> Result<String>;
}

/// The default implementation of `WorkingTreeProbe`, which uses the system's
/// `git` command.
///
/// Commands run in `dir` when set, otherwise in the process working
/// directory.
#[derive(Debug, Clone, Default)]
pub struct GitWorkingTree {
    dir: Option<PathBuf>,
}

impl GitWorkingTree {
    /// Probes the tree containing the process working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Probes the tree containing `dir`.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }
}

impl WorkingTreeProbe for GitWorkingTree {
    fn remote_location(&self) -> Result<String> {
        crate::git::remote_origin_url(self.dir.as_deref())
    }

    fn root_path(&self) -> Result<PathBuf> {
        crate::git::show_toplevel(self.dir.as_deref())
    }

    fn revision(&self, root: &Path) -> Result<String> {
        crate::git::rev_parse_head(root)
    }
}

/// Decides whether origins refer to the ambient working tree.
///
/// Every call probes afresh; nothing is cached between sources or passes.
pub struct LocalOriginDetector {
    probe: Box<dyn WorkingTreeProbe>,
}

impl LocalOriginDetector {
    /// Creates a detector probing the tree around the process working
    /// directory.
    pub fn new() -> Self {
        Self::with_probe(Box::new(GitWorkingTree::new()))
    }

    /// Creates a detector with a custom probe.
    pub fn with_probe(probe: Box<dyn WorkingTreeProbe>) -> Self {
        Self { probe }
    }

    /// Checks whether `origin` is the current working tree.
    ///
    /// Returns:
    /// - `Ok(Some(root))` when the tree's remote matches `origin` under
    ///   [`origin::same_origin`]; `root` is the tree's top-level directory
    /// - `Ok(None)` when there is no tree, no remote, or no match
    /// - `Err(Error::EnvironmentProbe)` when the remote matched but the root
    ///   could not be resolved
    pub fn detect(&self, origin: &str) -> Result<Option<PathBuf>> {
        let current = match self.probe.remote_location() {
            Ok(current) => current,
            Err(e) => {
                debug!("No local working tree remote available: {}", e);
                return Ok(None);
            }
        };

        if !origin::same_origin(&current, origin) {
            return Ok(None);
        }

        let root = self
            .probe
            .root_path()
            .map_err(|e| Error::EnvironmentProbe {
                origin: origin.to_string(),
                message: e.to_string(),
            })?;
        Ok(Some(root))
    }

    /// Resolves the commit checked out in the tree at `root`.
    ///
    /// Failures are reported as `Error::RevisionResolution` carrying `root`.
    pub fn resolve_revision(&self, root: &Path) -> Result<String> {
        self.probe.revision(root).map_err(|e| match e {
            Error::RevisionResolution { .. } => e,
            other => Error::RevisionResolution {
                path: root.display().to_string(),
                message: other.to_string(),
            },
        })
    }
}

impl Default for LocalOriginDetector {
    fn default() -> Self {
        Self::new()
    }
}
