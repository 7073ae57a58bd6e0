//! Orchestrator for a complete preview pass
//!
//! This module coordinates all phases to provide a clean API for previewing
//! one application: plan the renderer invocations, then execute them.

use super::{phase1, phase2, phase3, phase4, RenderPlan};
use crate::config::Application;
use crate::credentials::CredentialResolver;
use crate::error::{Error, Result};
use crate::phases::references::ReferenceTable;
use crate::render::Renderer;
use crate::repository::LocalOriginDetector;
use log::debug;

/// Plan the renderer invocations for `application` (Phases 1-3 and origin
/// selection)
///
/// For a multi-source application:
/// 1. Validate the sources as written
/// 2. Resolve every source against the ambient working tree
/// 3. Build the reference table from the resolved sources
///
/// A single-source application only needs a non-empty origin and local
/// resolution; its reference table is empty.
pub fn plan(
    application: &Application,
    detector: &LocalOriginDetector,
    credentials: &dyn CredentialResolver,
) -> Result<RenderPlan> {
    let name = application.name();
    let sources = application.sources();
    if sources.is_empty() {
        return Err(Error::NoSource {
            application: name.to_string(),
        });
    }

    let multi_source = application.has_multiple_sources();
    let (resolved, references) = if multi_source {
        // Phase 1: Constraint Validation
        phase1::validate(&sources)?;

        // Phase 2: Local Resolution
        let resolved = phase2::resolve_sources(&sources, detector, name)?;

        // Phase 3: Reference Table
        let references = phase3::build_references(&resolved);
        (resolved, references)
    } else {
        if sources[0].repo_url.is_empty() {
            return Err(Error::NoSource {
                application: name.to_string(),
            });
        }
        let resolved = phase2::resolve_sources(&sources, detector, name)?;
        (resolved, ReferenceTable::new())
    };

    debug!(
        "Planned {} source(s) for {} with {} reference(s)",
        resolved.len(),
        name,
        references.len()
    );

    Ok(RenderPlan {
        application: name.to_string(),
        namespace: application.namespace().to_string(),
        multi_source,
        references,
        sources: phase4::plan_sources(resolved, credentials, name),
    })
}

/// Execute a plan (Phase 4), returning every rendered document in source
/// order.
pub fn execute(plan: &RenderPlan, renderer: &dyn Renderer) -> Result<Vec<String>> {
    phase4::render_all(plan, renderer)
}

/// Plan and execute in one step.
pub fn generate(
    application: &Application,
    detector: &LocalOriginDetector,
    renderer: &dyn Renderer,
    credentials: &dyn CredentialResolver,
) -> Result<Vec<String>> {
    let plan = plan(application, detector, credentials)?;
    execute(&plan, renderer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContentSource;
    use crate::credentials::Credentials;
    use crate::render::{OriginOverride, RenderRequest};
    use crate::repository::fakes::FakeProbe;
    use std::cell::RefCell;
    use std::path::PathBuf;

    const SHA: &str = "89abcdef0123456789abcdef0123456789abcdef";

    struct NoCredentials;

    impl CredentialResolver for NoCredentials {
        fn credentials_for(&self, _origin: &str) -> Credentials {
            Credentials::default()
        }
    }

    /// What the renderer saw for one call
    #[derive(Debug, Clone)]
    struct Call {
        origin: OriginOverride,
        target_revision: String,
        path: Option<String>,
        reference_keys: Vec<String>,
        multi_source: bool,
    }

    #[derive(Default)]
    struct RecordingRenderer {
        documents_per_call: usize,
        fail_at: Option<usize>,
        calls: RefCell<Vec<Call>>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&self, request: &RenderRequest<'_>) -> Result<Vec<String>> {
            let index = self.calls.borrow().len();
            self.calls.borrow_mut().push(Call {
                origin: request.origin.clone(),
                target_revision: request.source.target_revision.clone(),
                path: request.source.path.clone(),
                reference_keys: request.references.keys().cloned().collect(),
                multi_source: request.multi_source,
            });
            if self.fail_at == Some(index) {
                return Err(Error::Manifest {
                    path: "broken.yaml".to_string(),
                    message: "not a mapping".to_string(),
                });
            }
            Ok((0..self.documents_per_call)
                .map(|i| format!(r#"{{"kind":"ConfigMap","metadata":{{"name":"cm-{}-{}"}}}}"#, index, i))
                .collect())
        }
    }

    fn renderer(documents_per_call: usize) -> RecordingRenderer {
        RecordingRenderer {
            documents_per_call,
            ..Default::default()
        }
    }

    fn in_tree() -> LocalOriginDetector {
        LocalOriginDetector::with_probe(Box::new(FakeProbe::in_tree(
            "git@github.com:owner/repo.git",
            "/work/repo",
            SHA,
        )))
    }

    fn outside_tree() -> LocalOriginDetector {
        LocalOriginDetector::with_probe(Box::new(FakeProbe::outside_tree()))
    }

    #[test]
    fn test_two_sources_with_reference() {
        let app = Application::with_sources(
            "guestbook",
            vec![
                ContentSource::new("https://github.com/owner/repo.git", "main").with_path("guestbook"),
                ContentSource::new("https://github.com/owner/repo.git", "main").with_ref("configs"),
            ],
        );
        let renderer = renderer(2);

        let documents = generate(&app, &outside_tree(), &renderer, &NoCredentials).unwrap();

        let calls = renderer.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].path.as_deref(), Some("guestbook"));
        assert_eq!(calls[1].path, None);
        assert_eq!(calls[0].reference_keys, vec!["$configs".to_string()]);
        assert!(calls.iter().all(|c| c.multi_source));
        assert_eq!(documents.len(), 4);
        assert!(documents[0].contains("cm-0-0"));
        assert!(documents[3].contains("cm-1-1"));
    }

    #[test]
    fn test_local_sources_are_pinned_and_referenced() {
        let app = Application::with_sources(
            "guestbook",
            vec![
                ContentSource::new("https://github.com/owner/repo.git", "main").with_path("guestbook"),
                ContentSource::new("https://github.com/owner/repo", "main").with_ref("values"),
            ],
        );

        let plan = plan(&app, &in_tree(), &NoCredentials).unwrap();
        assert_eq!(plan.references["$values"].target_revision, SHA);
        for planned in &plan.sources {
            assert_eq!(planned.origin, OriginOverride::local(&PathBuf::from("/work/repo")));
            assert_eq!(planned.source.target_revision, SHA);
        }
        // The descriptor keeps its floating selector.
        assert_eq!(app.sources()[0].target_revision, "main");
    }

    #[test]
    fn test_single_source() {
        let app = Application::with_source(
            "guestbook",
            ContentSource::new("https://github.com/owner/repo.git", "main").with_path("guestbook"),
        );
        let renderer = renderer(3);

        let documents = generate(&app, &in_tree(), &renderer, &NoCredentials).unwrap();
        assert_eq!(documents.len(), 3);

        let calls = renderer.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert!(!calls[0].multi_source);
        assert!(calls[0].reference_keys.is_empty());
        assert_eq!(calls[0].target_revision, SHA);
        assert!(calls[0].origin.is_local());
    }

    #[test]
    fn test_single_source_remote_when_not_matching() {
        let app = Application::with_source(
            "guestbook",
            ContentSource::new("https://github.com/argoproj/argocd-example-apps.git", "HEAD"),
        );
        let plan = plan(&app, &in_tree(), &NoCredentials).unwrap();
        assert_eq!(
            plan.sources[0].origin.url(),
            "https://github.com/argoproj/argocd-example-apps.git"
        );
        assert_eq!(plan.sources[0].source.target_revision, "HEAD");
    }

    #[test]
    fn test_no_source_is_rejected() {
        let app = Application::with_sources("empty", Vec::new());
        let err = plan(&app, &outside_tree(), &NoCredentials).unwrap_err();
        assert!(matches!(err, Error::NoSource { .. }));
    }

    #[test]
    fn test_single_source_without_origin_is_rejected() {
        let app = Application::with_source("blank", ContentSource::new("", "main"));
        let err = plan(&app, &outside_tree(), &NoCredentials).unwrap_err();
        assert!(matches!(err, Error::NoSource { .. }));
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn test_validation_failure_skips_rendering() {
        let app = Application::with_sources(
            "mixed",
            vec![
                ContentSource::new("https://github.com/a/a.git", "main"),
                ContentSource::new("https://github.com/b/b.git", "main"),
            ],
        );
        let renderer = renderer(1);

        let err = generate(&app, &outside_tree(), &renderer, &NoCredentials).unwrap_err();
        assert!(matches!(err, Error::OriginMismatch { index: 1, .. }));
        assert!(renderer.calls.borrow().is_empty());
    }

    #[test]
    fn test_render_failure_reports_index() {
        let app = Application::with_sources(
            "guestbook",
            vec![
                ContentSource::new("https://github.com/owner/repo.git", "main").with_path("a"),
                ContentSource::new("https://github.com/owner/repo.git", "main").with_path("b"),
                ContentSource::new("https://github.com/owner/repo.git", "main").with_path("c"),
            ],
        );
        let renderer = RecordingRenderer {
            documents_per_call: 1,
            fail_at: Some(1),
            ..Default::default()
        };

        let err = generate(&app, &outside_tree(), &renderer, &NoCredentials).unwrap_err();
        assert!(matches!(err, Error::Rendering { index: 1, .. }));
        assert!(err.to_string().contains("broken.yaml"));
        assert_eq!(renderer.calls.borrow().len(), 2);
    }

    #[test]
    fn test_registry_with_repository_values() {
        let app = Application::with_sources(
            "grafana",
            vec![
                ContentSource::registry("https://grafana.github.io/helm-charts", "grafana", "6.57.4"),
                ContentSource::new("git@github.com:owner/repo.git", "main").with_ref("values"),
            ],
        );
        let plan = plan(&app, &in_tree(), &NoCredentials).unwrap();
        assert!(!plan.sources[0].origin.is_local());
        assert!(plan.sources[1].origin.is_local());
        assert_eq!(plan.references.len(), 1);
    }
}
