//! # Result Projection
//!
//! Turns the raw documents produced by a preview pass into records grouped
//! by kind. The grouping key is the lower-cased `kind`, so `Deployment` and
//! `deployment` land in the same bucket. Buckets iterate in lexicographic
//! order and keep document order inside each bucket.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// One rendered resource
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Resource(pub Value);

impl Resource {
    /// The resource `kind`, or an empty string when absent.
    pub fn kind(&self) -> &str {
        self.0.get("kind").and_then(Value::as_str).unwrap_or_default()
    }

    /// `metadata.name`, or an empty string when absent.
    pub fn name(&self) -> &str {
        self.0
            .get("metadata")
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Resources grouped by lower-cased kind
pub type ResourcesByKind = BTreeMap<String, Vec<Resource>>;

/// Parses `documents` and groups them by lower-cased kind.
///
/// When `kind` is given only that kind is kept, compared without regard to
/// case. Any document that is not a JSON object fails the whole call.
pub fn classify(documents: &[String], kind: Option<&str>) -> Result<ResourcesByKind> {
    let wanted = kind.map(str::to_lowercase);
    let mut grouped = ResourcesByKind::new();

    for (index, document) in documents.iter().enumerate() {
        let value: Value =
            serde_json::from_str(document).map_err(|e| Error::MalformedDocument {
                index,
                message: e.to_string(),
            })?;
        if !value.is_object() {
            return Err(Error::MalformedDocument {
                index,
                message: "document is not an object".to_string(),
            });
        }

        let resource = Resource(value);
        let key = resource.kind().to_lowercase();
        if wanted.as_ref().is_some_and(|w| *w != key) {
            continue;
        }
        grouped.entry(key).or_default().push(resource);
    }

    Ok(grouped)
}
