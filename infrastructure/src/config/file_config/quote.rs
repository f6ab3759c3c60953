//! Direct quote configuration from TOML (`[quote]` section)

use sensing_application::QuoteRetryParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw `[quote]` configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQuoteConfig {
    /// Consult the quote provider before searching
    pub enabled: bool,
    /// Total attempts per symbol, counting the first
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each further retry
    pub backoff_base_ms: u64,
}

impl Default for FileQuoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            backoff_base_ms: 2000,
        }
    }
}

impl FileQuoteConfig {
    pub fn to_retry_params(&self) -> QuoteRetryParams {
        let params = QuoteRetryParams::default()
            .with_max_attempts(self.max_attempts)
            .with_backoff_base(Duration::from_millis(self.backoff_base_ms));
        if self.enabled {
            params
        } else {
            QuoteRetryParams {
                enabled: false,
                ..params
            }
        }
    }
}
