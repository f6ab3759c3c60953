//! Ordered search backend chain
//!
//! Backends are tried in order; the first success wins. An empty chain
//! returns no results, which sends every entity down the `unknown` path.

use async_trait::async_trait;
use sensing_application::{SearchError, SearchOptions, SearchProvider};
use sensing_domain::SearchResult;
use std::sync::Arc;
use tracing::warn;

pub struct FallbackSearchProvider {
    providers: Vec<Arc<dyn SearchProvider>>,
    name: String,
}

impl FallbackSearchProvider {
    pub fn new(providers: Vec<Arc<dyn SearchProvider>>) -> Self {
        let name = if providers.is_empty() {
            "none".to_string()
        } else {
            providers
                .iter()
                .map(|p| p.name())
                .collect::<Vec<_>>()
                .join(" -> ")
        };
        Self { providers, name }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }
}

#[async_trait]
impl SearchProvider for FallbackSearchProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let mut last_error = None;
        for (i, provider) in self.providers.iter().enumerate() {
            match provider.search(query, options).await {
                Ok(results) => return Ok(results),
                Err(e) => {
                    if i + 1 < self.providers.len() {
                        warn!(
                            "Search via {} failed ({}), falling back to {}",
                            provider.name(),
                            e,
                            self.providers[i + 1].name()
                        );
                    }
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(Vec::new()),
        }
    }
}
