//! Lookup Quote use case
//!
//! Label → symbol through the curated table, then an authoritative quote.
//! Rate-limit responses are retried on the same provider with exponential
//! backoff; any other failure is a miss.

use crate::config::QuoteRetryParams;
use crate::ports::quote_provider::QuoteProvider;
use sensing_domain::{DirectQuote, LabelIndex, LabelMatch};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct LookupQuoteUseCase {
    provider: Arc<dyn QuoteProvider>,
    symbols: Arc<LabelIndex<String>>,
    retry: QuoteRetryParams,
}

impl LookupQuoteUseCase {
    pub fn new(
        provider: Arc<dyn QuoteProvider>,
        symbols: Arc<LabelIndex<String>>,
        retry: QuoteRetryParams,
    ) -> Self {
        Self {
            provider,
            symbols,
            retry,
        }
    }

    /// Resolve the label's symbol without calling the provider.
    pub fn symbol_for(&self, label: &str) -> Option<&str> {
        let hit = self.symbols.lookup(label)?;
        match hit.matched {
            LabelMatch::Exact => debug!("Symbol exact match: '{}' -> {}", label, hit.value),
            LabelMatch::Fuzzy => debug!(
                "Symbol containment match: '{}' -> {} (via '{}')",
                label, hit.value, hit.key
            ),
        }
        Some(hit.value.as_str())
    }

    pub async fn execute(&self, label: &str) -> Option<DirectQuote> {
        if !self.retry.enabled {
            return None;
        }
        let symbol = self.symbol_for(label)?;
        let max_attempts = self.retry.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.provider.quote(symbol).await {
                Ok(Some(quote)) => {
                    info!(
                        "Direct quote for '{}' via {}: {} {}",
                        label,
                        self.provider.name(),
                        quote.display_value(),
                        symbol
                    );
                    return Some(quote);
                }
                Ok(None) => {
                    info!("{} has no data for {}", self.provider.name(), symbol);
                    return None;
                }
                Err(e) if e.is_rate_limited() && attempt < max_attempts => {
                    let delay = self.retry.backoff_for(attempt);
                    warn!(
                        "{} rate limited for {} (attempt {}/{}), retrying in {:?}",
                        self.provider.name(),
                        symbol,
                        attempt,
                        max_attempts,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!(
                        "Direct quote for {} failed after {} attempt(s): {}",
                        symbol, attempt, e
                    );
                    return None;
                }
            }
        }
        None
    }
}
