//! Phase 1: Constraint Validation
//!
//! This is the first phase of a multi-source pass. It checks the sources
//! exactly as written, before anything is resolved:
//!
//! 1.  **Non-empty origins**: every source must name an origin.
//! 2.  **Same origin**: all repository (non-registry) sources must point at
//!     the same location, compared with [`crate::origin::same_origin`].
//!     Registry sources name a package and may come from any registry.
//!
//! The first violation aborts the pass; later sources are not inspected.

use crate::config::ContentSource;
use crate::error::{Error, Result};
use crate::origin;

/// Validates the sources of a multi-source application.
pub fn validate(sources: &[ContentSource]) -> Result<()> {
    let mut first_repository: Option<(usize, &str)> = None;

    for (index, source) in sources.iter().enumerate() {
        if source.repo_url.is_empty() {
            return Err(Error::EmptyOrigin { index });
        }

        if source.is_registry() {
            continue;
        }

        match first_repository {
            None => first_repository = Some((index, &source.repo_url)),
            Some((first_index, first_origin)) => {
                if !origin::same_origin(first_origin, &source.repo_url) {
                    return Err(Error::OriginMismatch {
                        index,
                        origin: source.repo_url.clone(),
                        first_index,
                        first_origin: first_origin.to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}
