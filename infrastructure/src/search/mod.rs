//! Search provider adapters

mod fallback;
mod serper;
mod tavily;

pub use fallback::FallbackSearchProvider;
pub use serper::SerperSearchProvider;
pub use tavily::TavilySearchProvider;

use crate::config::FileProvidersConfig;
use sensing_application::SearchProvider;
use std::sync::Arc;
use tracing::{info, warn};

/// Build the backend chain in `providers.search` order, skipping backends
/// without credentials.
pub fn build_search_chain(
    config: &FileProvidersConfig,
    client: &reqwest::Client,
) -> FallbackSearchProvider {
    let mut chain: Vec<Arc<dyn SearchProvider>> = Vec::new();
    for name in &config.search {
        match name.to_lowercase().as_str() {
            "tavily" => match config.tavily_key() {
                Some(key) => chain.push(Arc::new(TavilySearchProvider::new(client.clone(), key))),
                None => info!("Tavily not configured, skipping"),
            },
            "serper" => match config.serper_key() {
                Some(key) => chain.push(Arc::new(SerperSearchProvider::new(client.clone(), key))),
                None => info!("Serper not configured, skipping"),
            },
            other => warn!("Unknown search provider '{}' ignored", other),
        }
    }

    if chain.is_empty() {
        warn!("No search provider configured; every search will return no results");
    }
    FallbackSearchProvider::new(chain)
}
