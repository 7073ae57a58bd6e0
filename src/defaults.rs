//! Default values and well-known names for gitops-preview.
//!
//! This module provides centralized defaults used across the library and the
//! commands, ensuring consistency and avoiding duplication.

/// Environment variable holding the username for remote origins.
pub const USERNAME_ENV: &str = "GITOPS_PREVIEW_REPO_USERNAME";

/// Environment variable holding the password or token for remote origins.
pub const PASSWORD_ENV: &str = "GITOPS_PREVIEW_REPO_PASSWORD";

/// Environment variable overriding the `--log-level` flag.
pub const LOG_LEVEL_ENV: &str = "GITOPS_PREVIEW_LOG_LEVEL";

/// Environment variable overriding the `--output` flag.
pub const OUTPUT_ENV: &str = "GITOPS_PREVIEW_OUTPUT";

/// Log level used when none is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Scheme prefixed to working-tree roots in local origin overrides.
pub const LOCAL_SCHEME: &str = "file://";

/// Origin kind of local overrides.
pub const LOCAL_ORIGIN_KIND: &str = "git";

/// Prefix of reference table keys (`$values`).
pub const REFERENCE_PREFIX: &str = "$";

/// File extensions the directory renderer reads.
pub const MANIFEST_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Builds the reference table key for `name`.
pub fn reference_key(name: &str) -> String {
    format!("{}{}", REFERENCE_PREFIX, name)
}
