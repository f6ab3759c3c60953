//! Search results and the evidence sets built from them.

use super::host::domain_of;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single hit returned by a search provider.
///
/// `domain` is always derived from `url` at construction; it is never taken
/// from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub domain: String,
    pub snippet: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        let url = url.into();
        let domain = domain_of(&url).unwrap_or_default();
        Self {
            title: title.into(),
            url,
            domain,
            snippet: snippet.into(),
        }
    }

    /// Results without a resolvable domain can never count toward consensus.
    pub fn has_domain(&self) -> bool {
        !self.domain.is_empty()
    }
}

/// Which waterfall attempt produced an evidence set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attempt {
    /// Attempt 1: whitelist-scoped, short recency window.
    Whitelist,
    /// Attempt 2: open web, wider window, cross-validation required.
    OpenWeb,
}

impl Attempt {
    pub fn number(&self) -> u8 {
        match self {
            Attempt::Whitelist => 1,
            Attempt::OpenWeb => 2,
        }
    }

    /// Open-web evidence must pass authority screening (cross-validation).
    pub fn requires_authority_check(&self) -> bool {
        matches!(self, Attempt::OpenWeb)
    }
}

impl std::fmt::Display for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attempt::Whitelist => write!(f, "attempt 1 (whitelist)"),
            Attempt::OpenWeb => write!(f, "attempt 2 (open web)"),
        }
    }
}

/// Ordered, URL-deduplicated evidence for one waterfall attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSet {
    pub attempt: Attempt,
    results: Vec<SearchResult>,
}

impl EvidenceSet {
    /// Build from raw results, keeping the first occurrence of each URL.
    pub fn new(attempt: Attempt, raw: impl IntoIterator<Item = SearchResult>) -> Self {
        let mut seen = HashSet::new();
        let results = raw
            .into_iter()
            .filter(|r| !r.url.trim().is_empty())
            .filter(|r| seen.insert(r.url.trim().to_string()))
            .collect();
        Self { attempt, results }
    }

    pub fn empty(attempt: Attempt) -> Self {
        Self {
            attempt,
            results: Vec::new(),
        }
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<SearchResult> {
        self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn requires_authority_check(&self) -> bool {
        self.attempt.requires_authority_check()
    }

    /// Keep only the first `max` results.
    pub fn truncated(mut self, max: usize) -> Self {
        self.results.truncate(max);
        self
    }

    /// Look up a result by URL (exact match after trimming).
    pub fn find_by_url(&self, url: &str) -> Option<&SearchResult> {
        let url = url.trim();
        self.results.iter().find(|r| r.url.trim() == url)
    }

    /// Number of distinct domains represented in this evidence.
    pub fn distinct_domains(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.has_domain())
            .map(|r| r.domain.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}
