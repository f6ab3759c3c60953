//! Structured data provider port
//!
//! Statistical series services (e.g. FRED) addressed by entity label.
//! Providers own their label → series mapping.

use async_trait::async_trait;
use sensing_domain::StructuredObservation;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuredError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait StructuredProvider: Send + Sync {
    /// Name matched against `preferred_providers` in routing rules.
    fn name(&self) -> &str;

    /// `Ok(None)` when the provider has no series for this label.
    async fn fetch(&self, label: &str) -> Result<Option<StructuredObservation>, StructuredError>;
}
