//! Origin location normalization
//!
//! Content sources spell the same repository in many ways: SSH shorthand
//! (`git@github.com:owner/repo.git`), HTTPS with or without `.git`, mixed
//! case. Everything that compares origins goes through [`normalize`] so that
//! these spellings compare equal, while host, port, owner and repository name
//! stay significant.

/// Scheme prefixes removed during normalization.
const SCHEME_PREFIXES: [&str; 2] = ["https://", "http://"];

/// Suffix removed during normalization.
const GIT_SUFFIX: &str = ".git";

/// Converts an origin location to its comparable form.
///
/// - the value is lower-cased
/// - leading `https://` or `http://` prefixes are removed
/// - `user@host:owner/repo` becomes `host/owner/repo`
/// - trailing `.git` suffixes are removed
///
/// Ports and trailing slashes are kept, so
/// `https://git.example.com:8443/team/project.git` normalizes to
/// `git.example.com:8443/team/project`. A `user@host:` prefix followed by a
/// numeric segment and `/` is a port, not SSH shorthand, and is left alone.
/// Each step runs once over the output of the previous one and none of them
/// can produce input for an earlier step, so `normalize` is idempotent.
///
/// # Examples
///
/// ```
/// use gitops_preview::origin::normalize;
///
/// assert_eq!(normalize("git@github.com:owner/repo.git"), "github.com/owner/repo");
/// assert_eq!(normalize("https://GitHub.com/Owner/Repo"), "github.com/owner/repo");
/// ```
pub fn normalize(origin: &str) -> String {
    let lowered = origin.to_lowercase();

    let mut rest = lowered.as_str();
    while let Some(stripped) = SCHEME_PREFIXES
        .iter()
        .find_map(|prefix| rest.strip_prefix(prefix))
    {
        rest = stripped;
    }

    let mut url = match split_ssh_shorthand(rest) {
        Some((host, path)) => format!("{}/{}", host, path),
        None => rest.to_string(),
    };

    while url.ends_with(GIT_SUFFIX) {
        url.truncate(url.len() - GIT_SUFFIX.len());
    }

    url
}

/// Returns true when both origins name the same location after
/// normalization.
pub fn same_origin(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Splits `user@host:path` into `(host, path)`.
///
/// The user part must not contain `/` or `:`, which keeps embedded
/// credentials (`user:token@host/...`) out of this form. A path starting
/// with digits and `/` is a port (`user@host:8443/...`) and is not split.
fn split_ssh_shorthand(origin: &str) -> Option<(&str, &str)> {
    let (user, rest) = origin.split_once('@')?;
    if user.is_empty() || user.contains(['/', ':']) {
        return None;
    }

    let (host, path) = rest.split_once(':')?;
    if host.is_empty() || host.contains('/') || starts_with_port(path) {
        return None;
    }

    Some((host, path))
}

fn starts_with_port(path: &str) -> bool {
    let after_digits = path.trim_start_matches(|c: char| c.is_ascii_digit());
    after_digits.len() < path.len() && after_digits.starts_with('/')
}
