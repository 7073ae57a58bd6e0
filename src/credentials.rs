//! Credential lookup for remote origins.
//!
//! The planner only needs an opaque "origin in, credentials out" function,
//! modelled by the `CredentialResolver` trait. `EnvCredentials` is the
//! default: credentials embedded in an `http(s)` origin URL win, otherwise
//! the `GITOPS_PREVIEW_REPO_USERNAME` / `GITOPS_PREVIEW_REPO_PASSWORD`
//! environment variables are used.

use std::env;
use std::fmt;

use url::Url;

use crate::defaults::{PASSWORD_ENV, USERNAME_ENV};

/// Username and secret for one origin. Either may be empty.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// True when neither a username nor a secret is set.
    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}

// The secret never appears in logs or plan output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .finish()
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "anonymous");
        }
        write!(f, "{}:{}", self.username, redacted(&self.password))
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "***"
    }
}

/// Looks up credentials for remote origins
pub trait CredentialResolver {
    fn credentials_for(&self, origin: &str) -> Credentials;
}

/// Resolves credentials from the origin URL and the environment.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentials;

impl EnvCredentials {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialResolver for EnvCredentials {
    fn credentials_for(&self, origin: &str) -> Credentials {
        if let Some(embedded) = embedded_credentials(origin) {
            return embedded;
        }

        Credentials {
            username: env::var(USERNAME_ENV).unwrap_or_default(),
            password: env::var(PASSWORD_ENV).unwrap_or_default(),
        }
    }
}

/// Extracts `user:secret` from an `http(s)` URL, if present.
fn embedded_credentials(origin: &str) -> Option<Credentials> {
    let url = Url::parse(origin).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.username().is_empty() {
        return None;
    }

    Some(Credentials {
        username: url.username().to_string(),
        password: url.password().unwrap_or_default().to_string(),
    })
}
