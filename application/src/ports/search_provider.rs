//! Search provider port
//!
//! Keyword search returning ranked hits. Adapters live in the infrastructure
//! layer (Tavily, Serper, fallback chain).

use async_trait::async_trait;
use sensing_domain::SearchResult;
use thiserror::Error;

/// Errors that can occur during a search call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Per-call search options.
///
/// Capabilities an adapter cannot honor (e.g. a recency window) are ignored
/// by that adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Only return results published within this many days.
    pub recency_days: Option<u32>,
    /// Maximum results for this query.
    pub max_results: usize,
    /// Domains the caller will keep; adapters may push this down as a hint.
    pub include_domains: Vec<String>,
}

impl SearchOptions {
    pub fn new(max_results: usize) -> Self {
        Self {
            recency_days: None,
            max_results,
            include_domains: Vec::new(),
        }
    }

    pub fn with_recency_days(mut self, days: u32) -> Self {
        self.recency_days = Some(days);
        self
    }

    pub fn with_include_domains(mut self, domains: Vec<String>) -> Self {
        self.include_domains = domains;
        self
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Keyword search backend
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>, SearchError>;
}
