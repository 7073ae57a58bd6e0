//! Shared test utilities for integration and E2E tests.
//!
//! This module provides fixtures that build a throwaway `git` working tree
//! whose `origin` remote can be matched by a descriptor, so previews exercise
//! the local detection path without any network access.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let Some(fixture) = RepoFixture::new(descriptors::ORIGIN) else { return };
//!     let fixture = fixture.with_file("deploy/app.yaml", manifests::DEPLOYMENT);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::descriptors;
    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::RepoFixture;
}

/// Descriptor YAML snippets for testing.
#[allow(dead_code)]
pub mod descriptors {
    /// The `origin` remote configured in every fixture repository.
    pub const ORIGIN: &str = "git@github.com:example-org/platform-apps.git";

    /// Single source pointing at the fixture repository over HTTPS.
    pub const SINGLE_SOURCE: &str = r#"
apiVersion: argoproj.io/v1alpha1
kind: Application
metadata:
  name: guestbook
spec:
  project: default
  source:
    repoURL: https://github.com/example-org/platform-apps.git
    targetRevision: main
    path: guestbook
  destination:
    namespace: guestbook
"#;

    /// Two sources in the fixture repository; the second is referenced as `$values`.
    pub const MULTI_SOURCE: &str = r#"
apiVersion: argoproj.io/v1alpha1
kind: Application
metadata:
  name: platform
spec:
  project: default
  sources:
    - repoURL: https://github.com/Example-Org/platform-apps
      targetRevision: main
      path: guestbook
    - repoURL: git@github.com:example-org/platform-apps.git
      targetRevision: main
      path: configs
      ref: values
  destination:
    namespace: platform
"#;

    /// Two applications in one file.
    pub const TWO_APPLICATIONS: &str = r#"
apiVersion: argoproj.io/v1alpha1
kind: Application
metadata:
  name: guestbook
spec:
  source:
    repoURL: https://github.com/example-org/platform-apps.git
    targetRevision: main
    path: guestbook
---
apiVersion: argoproj.io/v1alpha1
kind: Application
metadata:
  name: configs
spec:
  source:
    repoURL: https://github.com/example-org/platform-apps.git
    targetRevision: main
    path: configs
"#;

    /// Repository sources from two different repositories.
    pub const MIXED_ORIGINS: &str = r#"
apiVersion: argoproj.io/v1alpha1
kind: Application
metadata:
  name: mixed
spec:
  sources:
    - repoURL: https://github.com/argoproj/argocd-example-apps.git
      targetRevision: HEAD
      path: guestbook
    - repoURL: https://github.com/different-org/different-repo.git
      targetRevision: HEAD
      path: manifests
"#;

    /// A source in a repository that is not the fixture repository.
    pub const REMOTE_ONLY: &str = r#"
apiVersion: argoproj.io/v1alpha1
kind: Application
metadata:
  name: remote
spec:
  source:
    repoURL: https://github.com/argoproj/argocd-example-apps.git
    targetRevision: HEAD
    path: guestbook
"#;

    /// A document that is not an Application.
    pub const NOT_AN_APPLICATION: &str = r#"
apiVersion: v1
kind: ConfigMap
metadata:
  name: settings
"#;
}

/// Manifest YAML snippets for fixture repositories.
#[allow(dead_code)]
pub mod manifests {
    pub const DEPLOYMENT: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: guestbook-ui
spec:
  replicas: 1
"#;

    pub const SERVICE: &str = r#"apiVersion: v1
kind: Service
metadata:
  name: guestbook-ui
spec:
  ports:
    - port: 80
"#;

    pub const CONFIG_MAP: &str = r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: values
data:
  replicas: "3"
"#;
}

/// Returns `true` when a `git` binary can be executed.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// A temporary `git` working tree with an `origin` remote and one commit.
pub struct RepoFixture {
    temp_dir: assert_fs::TempDir,
}

impl RepoFixture {
    /// Create a repository with `origin` set to `remote`.
    ///
    /// Returns `None` when `git` is not installed, so callers can skip.
    pub fn new(remote: &str) -> Option<Self> {
        if !git_available() {
            eprintln!("Skipping test: git is not available");
            return None;
        }

        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path();
        git(dir, &["init", "--quiet"]);
        git(dir, &["remote", "add", "origin", remote]);
        git(
            dir,
            &[
                "-c",
                "user.name=Test",
                "-c",
                "user.email=test@example.com",
                "-c",
                "commit.gpgsign=false",
                "commit",
                "--quiet",
                "--allow-empty",
                "-m",
                "initial",
            ],
        );
        Some(Self { temp_dir })
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the working tree root.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The checked-out commit.
    #[allow(dead_code)]
    pub fn head(&self) -> String {
        let output = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(self.path())
            .output()
            .expect("Failed to run git");
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Create a CLI command running in `subdir` of the working tree.
    pub fn command_in(&self, subdir: &str) -> assert_cmd::Command {
        let dir = self.path().join(subdir);
        std::fs::create_dir_all(&dir).expect("Failed to create directory");
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gitops-preview");
        cmd.current_dir(dir);
        cmd.env_remove("GITOPS_PREVIEW_OUTPUT");
        cmd.env_remove("GITOPS_PREVIEW_LOG_LEVEL");
        cmd
    }

    /// Create a CLI command running at the working tree root.
    pub fn command(&self) -> assert_cmd::Command {
        self.command_in("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptors_are_valid_yaml() {
        let all = [
            descriptors::SINGLE_SOURCE,
            descriptors::MULTI_SOURCE,
            descriptors::MIXED_ORIGINS,
            descriptors::REMOTE_ONLY,
        ];
        for descriptor in all {
            serde_yaml::from_str::<serde_yaml::Value>(descriptor)
                .expect("Descriptor should be valid YAML");
        }
    }

    #[test]
    fn test_fixture_has_head() {
        let Some(fixture) = RepoFixture::new(descriptors::ORIGIN) else {
            return;
        };
        assert_eq!(fixture.head().len(), 40);
    }
}
