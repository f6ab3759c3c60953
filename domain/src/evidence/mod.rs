//! Evidence gathered from search providers.
//!
//! - [`SearchResult`]: one hit, with its domain derived from the URL
//! - [`EvidenceSet`]: ordered, URL-deduplicated hits for one waterfall attempt
//! - [`domain_of`] / [`is_same_or_subdomain`]: domain derivation and matching

mod host;
mod search_result;

pub use host::{domain_of, is_same_or_subdomain, normalize_domain};
pub use search_result::{Attempt, EvidenceSet, SearchResult};
