//! Domain error types

use thiserror::Error;

/// Failure taxonomy for a single entity's sensing pipeline.
///
/// None of these are fatal to a batch: the coordinator converts every variant
/// into an `unknown` [`ConsensusState`](crate::ConsensusState) whose narrative
/// is taken from [`SensingError::narrative`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SensingError {
    /// No network path to any provider for a strategy.
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The oracle declared `unknown`, or the mechanical domain-count check failed.
    #[error("Extraction ambiguous: {0}")]
    ExtractionAmbiguous(String),

    /// No routing rule for an entity type; the synthesized default was used.
    #[error("No routing rule for entity type '{0}'")]
    ConfigurationGap(String),

    /// Oracle response failed schema validation.
    #[error("Malformed oracle output: {0}")]
    MalformedOracleOutput(String),
}

impl SensingError {
    /// Malformed output is handled exactly like an ambiguous extraction.
    pub fn is_ambiguous(&self) -> bool {
        matches!(
            self,
            SensingError::ExtractionAmbiguous(_) | SensingError::MalformedOracleOutput(_)
        )
    }

    /// Human-readable explanation placed in an `unknown` state's narrative.
    pub fn narrative(&self) -> String {
        match self {
            SensingError::ProviderUnavailable(detail) => {
                format!("No data provider reachable: {}", detail)
            }
            SensingError::ExtractionAmbiguous(detail) => {
                format!("Sources did not support a definite value: {}", detail)
            }
            SensingError::ConfigurationGap(entity_type) => {
                format!("No routing rule configured for '{}'", entity_type)
            }
            SensingError::MalformedOracleOutput(detail) => {
                format!("Extraction output could not be read: {}", detail)
            }
        }
    }
}
