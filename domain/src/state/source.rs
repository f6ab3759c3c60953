//! Provenance records attached to a state.

use crate::evidence::{SearchResult, domain_of, normalize_domain};
use serde::{Deserialize, Serialize};

/// How a source was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    NewsSearch,
    DirectApi,
    StructuredApi,
}

/// A single piece of provenance: where a value was seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub domain: String,
    #[serde(rename = "type", default)]
    pub kind: SourceKind,
}

impl SourceRef {
    pub fn new(title: impl Into<String>, url: impl Into<String>, kind: SourceKind) -> Self {
        let url = url.into();
        let domain = domain_of(&url).unwrap_or_default();
        Self {
            title: title.into(),
            url,
            domain,
            kind,
        }
    }

    /// Effective domain for counting.
    ///
    /// The URL is authoritative; the self-declared `domain` field is only used
    /// when the URL has no resolvable host.
    pub fn effective_domain(&self) -> Option<String> {
        domain_of(&self.url).or_else(|| {
            let declared = normalize_domain(&self.domain);
            (!declared.is_empty() && declared.contains('.')).then_some(declared)
        })
    }
}

impl From<&SearchResult> for SourceRef {
    fn from(result: &SearchResult) -> Self {
        Self {
            title: result.title.clone(),
            url: result.url.clone(),
            domain: result.domain.clone(),
            kind: SourceKind::NewsSearch,
        }
    }
}
