//! Phase 4: Rendering
//!
//! Picks the origin each source is rendered from, then calls the renderer
//! once per source in source order.
//!
//! - A locally bound source is rendered from `file://<root>`.
//! - Every other source is rendered from its own origin, with the
//!   credentials looked up for that origin.
//!
//! Rendering is all-or-nothing: the first failing source aborts the pass and
//! is reported by index. Nothing is retried and no partial output escapes.

use log::debug;

use super::{PlannedSource, RenderPlan, ResolvedSource};
use crate::credentials::CredentialResolver;
use crate::error::{Error, Result};
use crate::render::{OriginOverride, RenderRequest, Renderer};

/// Computes the origin override for one resolved source.
pub fn origin_override(
    index: usize,
    resolved: &ResolvedSource,
    credentials: &dyn CredentialResolver,
    application: &str,
) -> OriginOverride {
    if let Some(binding) = &resolved.binding {
        return OriginOverride::local(&binding.root);
    }

    let url = &resolved.source.repo_url;
    debug!(
        "Using remote repository for source {} in {}: {}",
        index, application, url
    );
    OriginOverride::remote(url, credentials.credentials_for(url))
}

/// Pairs every resolved source with its origin override, keeping order.
pub fn plan_sources(
    resolved: Vec<ResolvedSource>,
    credentials: &dyn CredentialResolver,
    application: &str,
) -> Vec<PlannedSource> {
    resolved
        .into_iter()
        .enumerate()
        .map(|(index, resolved)| PlannedSource {
            index,
            origin: origin_override(index, &resolved, credentials, application),
            source: resolved.source,
        })
        .collect()
}

/// Calls the renderer for every planned source and concatenates the results.
pub fn render_all(plan: &RenderPlan, renderer: &dyn Renderer) -> Result<Vec<String>> {
    let mut documents = Vec::new();

    for planned in &plan.sources {
        let request = RenderRequest {
            application: &plan.application,
            namespace: &plan.namespace,
            source: &planned.source,
            origin: &planned.origin,
            references: &plan.references,
            multi_source: plan.multi_source,
        };

        let rendered = renderer.render(&request).map_err(|e| Error::Rendering {
            index: planned.index,
            source: Box::new(e),
        })?;
        debug!(
            "Rendered {} document(s) from source {} of {}",
            rendered.len(),
            planned.index,
            plan.application
        );
        documents.extend(rendered);
    }

    Ok(documents)
}
