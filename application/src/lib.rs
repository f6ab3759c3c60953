//! Application layer for node-sensing
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{QuoteRetryParams, SensingParams};
pub use ports::{
    progress::{EnrichmentProgress, NoProgress},
    quote_provider::{QuoteError, QuoteProvider},
    reasoning_oracle::{OracleError, ReasoningOracle},
    search_provider::{SearchError, SearchOptions, SearchProvider},
    structured_provider::{StructuredError, StructuredProvider},
};
pub use use_cases::enrich_nodes::EnrichNodesUseCase;
pub use use_cases::gather_evidence::{GatherEvidenceInput, GatherEvidenceUseCase};
pub use use_cases::lookup_quote::LookupQuoteUseCase;
pub use use_cases::lookup_structured::LookupStructuredUseCase;
pub use use_cases::validate_consensus::{
    ValidateConsensusUseCase, ValidationOutcome, ValidationStage,
};
