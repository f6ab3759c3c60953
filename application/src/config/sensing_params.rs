//! Sensing parameters: waterfall and batch control.
//!
//! [`SensingParams`] groups the static parameters used by
//! [`ValidateConsensusUseCase`](crate::use_cases::validate_consensus::ValidateConsensusUseCase)
//! and [`EnrichNodesUseCase`](crate::use_cases::enrich_nodes::EnrichNodesUseCase).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Waterfall and batch control parameters.
///
/// | Attempt | Filter | Recency | Results per query | Overall cap |
/// |---------|--------|---------|-------------------|-------------|
/// | 1 (whitelist) | tier1 ∪ tier2 | `whitelist_recency_days` | `per_query_results` | none |
/// | 2 (open web) | none | `fullweb_recency_days` | `fullweb_max_results` | `fullweb_max_results` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensingParams {
    /// Entities processed in parallel during a batch.
    pub max_concurrency: usize,
    pub whitelist_recency_days: u32,
    pub fullweb_recency_days: u32,
    pub fullweb_max_results: usize,
    pub per_query_results: usize,
}

impl Default for SensingParams {
    fn default() -> Self {
        Self {
            max_concurrency: 5,
            whitelist_recency_days: 7,
            fullweb_recency_days: 30,
            fullweb_max_results: 10,
            per_query_results: 5,
        }
    }
}

impl SensingParams {
    // ==================== Builder Methods ====================

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }

    pub fn with_recency_days(mut self, whitelist: u32, fullweb: u32) -> Self {
        self.whitelist_recency_days = whitelist;
        self.fullweb_recency_days = fullweb;
        self
    }

    pub fn with_fullweb_max_results(mut self, max: usize) -> Self {
        self.fullweb_max_results = max;
        self
    }

    /// Effective concurrency; zero would deadlock the batch.
    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrency.max(1)
    }
}

/// Retry policy for direct quote calls.
///
/// Only rate-limit responses are retried; the delay doubles per attempt
/// starting from `backoff_base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRetryParams {
    pub enabled: bool,
    pub max_attempts: u32,
    pub backoff_base: Duration,
}

impl Default for QuoteRetryParams {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            backoff_base: Duration::from_millis(2000),
        }
    }
}

impl QuoteRetryParams {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// Delay before retry number `retry` (1-based): `base * 2^(retry-1)`.
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        self.backoff_base.saturating_mul(1u32 << exponent)
    }
}
