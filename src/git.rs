//! Thin wrappers around the system `git` command.
//!
//! Only read-only inspection of a working tree happens here: reading the
//! configured `origin` remote, resolving the top-level directory and
//! resolving the checked-out commit. Nothing is cloned or fetched.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Runs `git` with `args` and returns its trimmed stdout.
///
/// When `dir` is `None` the command runs in the process working directory.
fn run_git(args: &[&str], dir: Option<&Path>) -> Result<String> {
    let mut command = Command::new("git");
    command.args(args);
    if let Some(dir) = dir {
        command.current_dir(dir);
    }

    let dir_display = dir
        .map(|d| d.display().to_string())
        .unwrap_or_else(|| ".".to_string());

    let output = command.output().map_err(|e| Error::GitCommand {
        command: args.join(" "),
        dir: dir_display.clone(),
        stderr: e.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GitCommand {
            command: args.join(" "),
            dir: dir_display,
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Read the URL of the `origin` remote of the working tree containing `dir`.
///
/// Fails when `dir` is not inside a working tree, when no `origin` remote is
/// configured, or when it is configured to an empty value.
pub fn remote_origin_url(dir: Option<&Path>) -> Result<String> {
    let url = run_git(&["config", "--get", "remote.origin.url"], dir)?;
    if url.is_empty() {
        return Err(Error::GitCommand {
            command: "config --get remote.origin.url".to_string(),
            dir: dir
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| ".".to_string()),
            stderr: "remote.origin.url is empty".to_string(),
        });
    }
    Ok(url)
}

/// Resolve the top-level directory of the working tree containing `dir`.
pub fn show_toplevel(dir: Option<&Path>) -> Result<PathBuf> {
    run_git(&["rev-parse", "--show-toplevel"], dir).map(PathBuf::from)
}

/// Resolve the commit currently checked out in the working tree at `repo_path`.
pub fn rev_parse_head(repo_path: &Path) -> Result<String> {
    let repo = repo_path.to_string_lossy();
    run_git(&["-C", &repo, "rev-parse", "HEAD"], None).map_err(|e| {
        let message = match e {
            Error::GitCommand { stderr, .. } => stderr,
            other => other.to_string(),
        };
        Error::RevisionResolution {
            path: repo_path.display().to_string(),
            message,
        }
    })
}
