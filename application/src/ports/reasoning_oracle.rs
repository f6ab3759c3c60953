//! Reasoning oracle port
//!
//! Reads evidence and proposes a value. Its output is untrusted: the
//! consensus validator re-derives everything it can check.

use async_trait::async_trait;
use sensing_domain::{EvidenceSet, ExtractionMode, OracleExtraction, ParseError, SensingError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Oracle not configured: {0}")]
    NotConfigured(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Malformed output: {0}")]
    Malformed(#[from] ParseError),
}

impl From<OracleError> for SensingError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::Malformed(parse) => parse.into(),
            other => SensingError::ProviderUnavailable(other.to_string()),
        }
    }
}

#[async_trait]
pub trait ReasoningOracle: Send + Sync {
    async fn extract(
        &self,
        label: &str,
        evidence: &EvidenceSet,
        mode: ExtractionMode,
    ) -> Result<OracleExtraction, OracleError>;
}
