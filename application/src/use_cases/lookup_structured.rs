//! Lookup Structured use case
//!
//! Consults registered structured-data providers in preference order. A
//! provider error or miss moves on to the next one.

use crate::ports::structured_provider::StructuredProvider;
use sensing_domain::StructuredObservation;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone, Default)]
pub struct LookupStructuredUseCase {
    providers: Vec<Arc<dyn StructuredProvider>>,
}

impl LookupStructuredUseCase {
    pub fn new(providers: Vec<Arc<dyn StructuredProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Providers named in `preferred`, in that order; all registered
    /// providers when `preferred` is empty.
    fn candidates<'a>(&'a self, preferred: &[String]) -> Vec<&'a Arc<dyn StructuredProvider>> {
        if preferred.is_empty() {
            return self.providers.iter().collect();
        }
        preferred
            .iter()
            .filter_map(|name| {
                let found = self
                    .providers
                    .iter()
                    .find(|p| p.name().eq_ignore_ascii_case(name));
                if found.is_none() {
                    warn!("Preferred provider '{}' is not registered", name);
                }
                found
            })
            .collect()
    }

    pub async fn execute(
        &self,
        label: &str,
        preferred: &[String],
    ) -> Option<StructuredObservation> {
        for provider in self.candidates(preferred) {
            match provider.fetch(label).await {
                Ok(Some(observation)) => {
                    info!(
                        "Structured data for '{}' via {}: {} = {}",
                        label,
                        provider.name(),
                        observation.series_id,
                        observation.display_value()
                    );
                    return Some(observation);
                }
                Ok(None) => info!("{} has no series for '{}'", provider.name(), label),
                Err(e) => warn!("{} failed for '{}': {}", provider.name(), label, e),
            }
        }
        None
    }
}
