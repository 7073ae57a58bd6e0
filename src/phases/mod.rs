//! Implementation of the phases of a preview pass.
//!
//! ## Overview
//!
//! A pass over one application follows 4 phases, always in this order:
//! 1. Constraint Validation - Reject empty origins and mixed repository origins
//! 2. Local Resolution - Bind sources to the ambient working tree and pin revisions
//! 3. Reference Table - Index `ref`-named sources by `$name`
//! 4. Rendering - Pick an origin per source, call the renderer, concatenate
//!
//! Single-source applications skip phases 1 and 3: a lone source has nothing
//! to agree with and nothing to reference.
//!
//! Validation sees only the sources as written, so its error messages never
//! contain partially-resolved data. The reference table only accepts
//! resolved sources, so a locally bound reference always carries the pinned
//! revision.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::ContentSource;
use crate::render::OriginOverride;

pub mod constraints;
pub mod orchestrator;
pub mod references;
pub mod rendering;
pub mod resolution;

pub use constraints as phase1;
pub use references as phase3;
pub use rendering as phase4;
pub use resolution as phase2;

use references::ReferenceTable;

/// Binding of a source to the ambient working tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBinding {
    /// Top-level directory of the working tree
    pub root: PathBuf,
    /// Commit checked out in the tree, when it could be resolved
    pub resolved_revision: Option<String>,
}

/// A working copy of a source after local resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    /// The source, with `target_revision` pinned when bound and resolvable
    pub source: ContentSource,
    /// Set when the source's origin is the ambient working tree
    pub binding: Option<LocalBinding>,
}

impl ResolvedSource {
    /// A source that is not bound to the working tree.
    pub fn remote(source: ContentSource) -> Self {
        Self {
            source,
            binding: None,
        }
    }

    pub fn is_local(&self) -> bool {
        self.binding.is_some()
    }
}

/// One renderer invocation of a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSource {
    /// Position of the source in the application
    pub index: usize,
    /// The resolved source handed to the renderer
    pub source: ContentSource,
    /// Where the renderer reads the source from
    pub origin: OriginOverride,
}

/// The complete, ordered set of renderer invocations for one application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub application: String,
    pub namespace: String,
    /// True when the application has more than one source
    pub multi_source: bool,
    /// Shared, read-only for the whole pass
    pub references: ReferenceTable,
    /// In source order
    pub sources: Vec<PlannedSource>,
}

/// Serializable summary of a plan, with credentials left out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary<'a> {
    pub application: &'a str,
    pub multi_source: bool,
    pub sources: Vec<PlannedSourceSummary<'a>>,
    pub references: &'a ReferenceTable,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedSourceSummary<'a> {
    pub index: usize,
    pub local: bool,
    pub repo: &'a str,
    pub target_revision: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<&'a str>,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub chart: &'a str,
}

impl RenderPlan {
    /// Number of renderer invocations.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// A summary safe to print.
    pub fn summary(&self) -> PlanSummary<'_> {
        PlanSummary {
            application: &self.application,
            multi_source: self.multi_source,
            references: &self.references,
            sources: self
                .sources
                .iter()
                .map(|planned| PlannedSourceSummary {
                    index: planned.index,
                    local: planned.origin.is_local(),
                    repo: planned.origin.url(),
                    target_revision: &planned.source.target_revision,
                    path: planned.source.path.as_deref(),
                    chart: &planned.source.chart,
                })
                .collect(),
        }
    }
}
