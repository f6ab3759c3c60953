//! Domain whitelist: the registry of authoritative source domains.
//!
//! The whitelist is built once from the category → domain-list configuration
//! and is immutable afterwards, so it can be shared across concurrent
//! pipelines behind an `Arc` without locking.
//!
//! Membership is a suffix match on label boundaries: `www.reuters.com` is a
//! member when `reuters.com` is listed.

use crate::evidence::{SearchResult, is_same_or_subdomain, normalize_domain};
use serde::{Deserialize, Serialize};

/// A named group of authoritative domains (e.g. `central_banks`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistCategory {
    pub name: String,
    pub domains: Vec<String>,
}

impl WhitelistCategory {
    pub fn new(
        name: impl Into<String>,
        domains: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }
}

/// Immutable registry of authoritative domains, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainWhitelist {
    categories: Vec<WhitelistCategory>,
    /// Flattened, normalized, first-occurrence-ordered domain list.
    domains: Vec<String>,
}

impl DomainWhitelist {
    /// Build from categories in configuration order.
    pub fn new(categories: Vec<WhitelistCategory>) -> Self {
        let mut domains: Vec<String> = Vec::new();
        for category in &categories {
            for domain in &category.domains {
                let normalized = normalize_domain(domain);
                if !normalized.is_empty() && !domains.contains(&normalized) {
                    domains.push(normalized);
                }
            }
        }
        Self {
            categories,
            domains,
        }
    }

    /// Whether `domain` (or a parent of it) is whitelisted.
    pub fn contains(&self, domain: &str) -> bool {
        self.matching_entry(domain).is_some()
    }

    /// The whitelist entry `domain` falls under, if any.
    pub fn matching_entry(&self, domain: &str) -> Option<&str> {
        self.domains
            .iter()
            .find(|entry| is_same_or_subdomain(domain, entry))
            .map(String::as_str)
    }

    /// Category name of the entry `domain` falls under.
    pub fn category_of(&self, domain: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.domains.iter().any(|d| is_same_or_subdomain(domain, d)))
            .map(|c| c.name.as_str())
    }

    /// All whitelisted domains, deduplicated, in configuration order.
    pub fn all_domains(&self) -> &[String] {
        &self.domains
    }

    pub fn categories(&self) -> &[WhitelistCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Keep only results whose domain falls under one of `allowed`.
///
/// An empty `allowed` list means "pass everything". Results without a
/// resolvable domain are dropped whenever a filter is active. The operation is
/// idempotent.
pub fn filter_by_domains(results: Vec<SearchResult>, allowed: &[String]) -> Vec<SearchResult> {
    if allowed.is_empty() {
        return results;
    }
    results
        .into_iter()
        .filter(|r| {
            r.has_domain()
                && allowed
                    .iter()
                    .any(|entry| is_same_or_subdomain(&r.domain, entry))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whitelist() -> DomainWhitelist {
        DomainWhitelist::new(vec![
            WhitelistCategory::new("wires", ["reuters.com", "bloomberg.com"]),
            WhitelistCategory::new("central_banks", ["federalreserve.gov", "www.pbc.gov.cn"]),
            WhitelistCategory::new("duplicates", ["Reuters.com"]),
        ])
    }

    fn hit(url: &str) -> SearchResult {
        SearchResult::new("t", url, "s")
    }

    #[test]
    fn test_contains_with_subdomains() {
        let wl = whitelist();
        assert!(wl.contains("reuters.com"));
        assert!(wl.contains("www.reuters.com"));
        assert!(wl.contains("markets.bloomberg.com"));
        assert!(wl.contains("pbc.gov.cn"));
        assert!(!wl.contains("notreuters.com"));
        assert!(!wl.contains("example.com"));
    }

    #[test]
    fn test_all_domains_deduplicated_in_order() {
        let wl = whitelist();
        assert_eq!(
            wl.all_domains(),
            &["reuters.com", "bloomberg.com", "federalreserve.gov", "pbc.gov.cn"]
        );
        assert_eq!(wl.len(), 4);
    }

    #[test]
    fn test_category_of() {
        let wl = whitelist();
        assert_eq!(wl.category_of("www.federalreserve.gov"), Some("central_banks"));
        assert_eq!(wl.category_of("reuters.com"), Some("wires"));
        assert_eq!(wl.category_of("blog.example.com"), None);
    }

    #[test]
    fn test_filter_drops_outsiders() {
        let allowed = vec!["reuters.com".to_string()];
        let filtered = filter_by_domains(
            vec![
                hit("https://www.reuters.com/a"),
                hit("https://spam.io/b"),
                hit("nonsense"),
            ],
            &allowed,
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].domain, "reuters.com");
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let results = vec![hit("https://spam.io/b"), hit("nonsense")];
        assert_eq!(filter_by_domains(results.clone(), &[]), results);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let allowed: Vec<String> = whitelist().all_domains().to_vec();
        let results = vec![
            hit("https://www.reuters.com/a"),
            hit("https://spam.io/b"),
            hit("https://federalreserve.gov/c"),
            hit("https://markets.bloomberg.com/d"),
        ];
        let once = filter_by_domains(results, &allowed);
        let twice = filter_by_domains(once.clone(), &allowed);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }
}
