//! Phase 2: Local Resolution
//!
//! Produces a resolved working copy of every source. The input list is never
//! modified.
//!
//! ## Process
//!
//! For each repository source, in order:
//!
//! 1.  **Detection**: ask the `LocalOriginDetector` whether the source's
//!     origin is the ambient working tree. A probe failure after a positive
//!     match aborts the pass; "no tree" and "no match" do not.
//! 2.  **Pinning**: for a bound source, resolve the checked-out commit and
//!     use it as the copy's `target_revision`. When this fails the original
//!     selector is kept and a warning is logged.
//!
//! Registry sources are never bound: they name a package, not a tree. Every
//! source is detected independently, so one application may mix bound and
//! unbound sources.

use log::{debug, info, warn};

use super::{LocalBinding, ResolvedSource};
use crate::config::ContentSource;
use crate::error::Result;
use crate::repository::LocalOriginDetector;

/// Resolves every source of `application` against the ambient working tree.
pub fn resolve_sources(
    sources: &[ContentSource],
    detector: &LocalOriginDetector,
    application: &str,
) -> Result<Vec<ResolvedSource>> {
    sources
        .iter()
        .enumerate()
        .map(|(index, source)| resolve_source(index, source, detector, application))
        .collect()
}

fn resolve_source(
    index: usize,
    source: &ContentSource,
    detector: &LocalOriginDetector,
    application: &str,
) -> Result<ResolvedSource> {
    if source.is_registry() {
        return Ok(ResolvedSource::remote(source.clone()));
    }

    let Some(root) = detector.detect(&source.repo_url)? else {
        return Ok(ResolvedSource::remote(source.clone()));
    };

    info!(
        "Detected local repository for source {} in {}, using path: {}",
        index,
        application,
        root.display()
    );

    let mut copy = source.clone();
    let resolved_revision = match detector.resolve_revision(&root) {
        Ok(revision) => {
            debug!("Resolved targetRevision to HEAD: {}", revision);
            copy.target_revision = revision.clone();
            Some(revision)
        }
        Err(e) => {
            warn!("Failed to resolve local revision: {}, using original", e);
            None
        }
    };

    Ok(ResolvedSource {
        source: copy,
        binding: Some(LocalBinding {
            root,
            resolved_revision,
        }),
    })
}
