//! Sensing pipeline configuration from TOML (`[sensing]` section)

use sensing_application::SensingParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw `[sensing]` configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSensingConfig {
    /// Entities enriched in parallel
    pub max_concurrency: usize,
    /// Recency window for the whitelist attempt
    pub whitelist_recency_days: u32,
    /// Recency window for the open-web attempt
    pub fullweb_recency_days: u32,
    /// Evidence cap for the open-web attempt
    pub fullweb_max_results: usize,
    /// Results requested per query
    pub per_query_results: usize,
    /// Timeout applied to every outbound HTTP request
    pub request_timeout_seconds: u64,
}

impl Default for FileSensingConfig {
    fn default() -> Self {
        let params = SensingParams::default();
        Self {
            max_concurrency: params.max_concurrency,
            whitelist_recency_days: params.whitelist_recency_days,
            fullweb_recency_days: params.fullweb_recency_days,
            fullweb_max_results: params.fullweb_max_results,
            per_query_results: params.per_query_results,
            request_timeout_seconds: 30,
        }
    }
}

impl FileSensingConfig {
    pub fn to_params(&self) -> SensingParams {
        SensingParams {
            max_concurrency: self.max_concurrency,
            whitelist_recency_days: self.whitelist_recency_days,
            fullweb_recency_days: self.fullweb_recency_days,
            fullweb_max_results: self.fullweb_max_results,
            per_query_results: self.per_query_results,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.max(1))
    }
}
