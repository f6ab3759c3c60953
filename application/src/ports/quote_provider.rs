//! Direct quote provider port

use async_trait::async_trait;
use sensing_domain::DirectQuote;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// The provider asked us to slow down; the only retryable error.
    #[error("Rate limited by quote provider")]
    RateLimited,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl QuoteError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, QuoteError::RateLimited)
    }
}

/// Authoritative last-traded quotes by symbol
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok(None)` is the normal "no data for this symbol" outcome.
    async fn quote(&self, symbol: &str) -> Result<Option<DirectQuote>, QuoteError>;
}
