//! Property-based tests for origin normalization.
//!
//! These tests use proptest to generate origin spellings and verify that the
//! equality rules hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::origin::{normalize, same_origin};
    use proptest::prelude::*;

    fn host() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,10}\\.[a-z]{2,5}"
    }

    fn segment() -> impl Strategy<Value = String> {
        "[a-z0-9_-]{1,12}"
    }

    /// Every spelling the normalizer is expected to treat as equal.
    fn spellings(host: &str, owner: &str, repo: &str) -> Vec<String> {
        vec![
            format!("git@{}:{}/{}.git", host, owner, repo),
            format!("git@{}:{}/{}", host, owner, repo),
            format!("https://{}/{}/{}.git", host, owner, repo),
            format!("https://{}/{}/{}", host, owner, repo),
            format!("http://{}/{}/{}.git", host, owner, repo),
            format!(
                "git@{}:{}/{}.git",
                host.to_uppercase(),
                owner.to_uppercase(),
                repo
            ),
            format!("https://{}/{}/{}", host, owner, repo.to_uppercase()),
        ]
    }

    proptest! {
        /// Property: normalize(normalize(x)) == normalize(x)
        #[test]
        fn normalize_is_idempotent(input in "[[:ascii:]]{0,60}") {
            let once = normalize(&input);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Property: normalize is idempotent on URL-shaped input too
        #[test]
        fn normalize_is_idempotent_on_urls(
            prefix in "(https://|http://|git@|HTTPS://)?",
            body in "[a-zA-Z0-9@:/._-]{0,40}",
            suffix in "(\\.git|\\.GIT|/)?",
        ) {
            let input = format!("{}{}{}", prefix, body, suffix);
            let once = normalize(&input);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Property: all spellings of one location normalize to the same value
        #[test]
        fn spellings_of_one_location_match(host in host(), owner in segment(), repo in segment()) {
            let variants = spellings(&host, &owner, &repo);
            let expected = format!("{}/{}/{}", host, owner, repo);
            for variant in &variants {
                prop_assert_eq!(normalize(variant), expected.clone(), "variant: {}", variant);
            }
        }

        /// Property: locations that differ in host, owner or repo never match
        #[test]
        fn different_locations_do_not_match(
            host_a in host(),
            host_b in host(),
            owner_a in segment(),
            owner_b in segment(),
            repo_a in segment(),
            repo_b in segment(),
        ) {
            prop_assume!(host_a != host_b || owner_a != owner_b || repo_a != repo_b);
            let a = format!("git@{}:{}/{}.git", host_a, owner_a, repo_a);
            let b = format!("https://{}/{}/{}.git", host_b, owner_b, repo_b);
            prop_assert!(!same_origin(&a, &b), "{} vs {}", a, b);
        }

        /// Property: a port after a user name stays part of the host
        #[test]
        fn port_after_user_is_kept(
            host in host(),
            port in 1u16..,
            owner in segment(),
            repo in segment(),
        ) {
            let input = format!("https://deploy@{}:{}/{}/{}.git", host, port, owner, repo);
            let once = normalize(&input);
            prop_assert_eq!(once.clone(), format!("deploy@{}:{}/{}/{}", host, port, owner, repo));
            prop_assert_eq!(normalize(&once), once);
            let without_port = format!("https://{}/{}/{}/{}", host, port, owner, repo);
            prop_assert!(!same_origin(&input, &without_port));
        }

        /// Property: normalized output never keeps a scheme or `.git` suffix
        #[test]
        fn normalized_output_is_stripped(host in host(), owner in segment(), repo in segment()) {
            for variant in spellings(&host, &owner, &repo) {
                let normalized = normalize(&variant);
                prop_assert!(!normalized.starts_with("https://"));
                prop_assert!(!normalized.starts_with("http://"));
                prop_assert!(!normalized.ends_with(".git"));
            }
        }
    }
}
