//! # Error Suggestions
//!
//! Helpers for user-facing errors that say what went wrong and how to fix
//! it. Each returns an `anyhow::Error` whose message ends in `hint:` lines.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gitops_preview::suggestions;
//!
//! if !path.exists() {
//!     return Err(suggestions::descriptor_not_found(path));
//! }
//! ```

use std::path::Path;

/// Error for a descriptor path that does not exist.
pub fn descriptor_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Descriptor file not found: {path}\n\n\
         hint: Pass the path to a YAML file containing Application documents\n\
         hint: Relative paths are resolved from the current directory",
        path = path.display()
    )
}

/// Error for a descriptor file without any Application document.
pub fn no_applications(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "No Application found in {path}\n\n\
         hint: Each document needs 'kind: Application' and a 'spec.source' or 'spec.sources'",
        path = path.display()
    )
}

/// Error for an `--name` that matches no application in the descriptor.
///
/// Suggests the closest application name when one is within a small edit
/// distance, and lists the available names.
pub fn application_not_found(name: &str, available: &[&str], path: &Path) -> anyhow::Error {
    let did_you_mean = find_similar(name, available)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Application '{name}' not found in {path}{did_you_mean}\n\n\
         Available applications: {apps}\n\
         hint: Run 'gitops-preview app preview {path}' to list them",
        path = path.display(),
        apps = available.join(", ")
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance, computed over chars with a single rolling row.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, a_char) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != *b_char);
            let next = (row[j + 1] + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }

    row[b_chars.len()]
}
