//! Phase 3: Reference Table
//!
//! Sources can expose themselves under a reference name (`ref: values`) so
//! that other sources address their files as `$values/path/to/file`. This
//! phase indexes those sources by `"$" + name`.
//!
//! The table is built from resolved sources only: a locally bound reference
//! must carry the pinned commit that is physically on disk, not the floating
//! branch name from the descriptor. The target deliberately has no path;
//! resolving the path is the renderer's job.

use std::collections::BTreeMap;

use serde::Serialize;

use super::ResolvedSource;
use crate::defaults::reference_key;

/// What a `$name` reference points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceTarget {
    pub target_revision: String,
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub chart: String,
}

/// Reference key (`$name`) to target
pub type ReferenceTable = BTreeMap<String, ReferenceTarget>;

/// Builds the reference table from resolved sources.
///
/// Only sources with a non-empty reference name appear. When two sources
/// share a name, the later one wins.
pub fn build_references(sources: &[ResolvedSource]) -> ReferenceTable {
    sources
        .iter()
        .filter_map(|resolved| {
            let source = &resolved.source;
            let name = source.reference_name()?;
            Some((
                reference_key(name),
                ReferenceTarget {
                    target_revision: source.target_revision.clone(),
                    repo_url: source.repo_url.clone(),
                    chart: source.chart.clone(),
                },
            ))
        })
        .collect()
}
