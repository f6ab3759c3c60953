//! Domain layer for node-sensing
//!
//! This crate contains the core rules, entities, and value objects of the
//! state sensing engine. It has no dependencies on infrastructure or
//! presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Consensus State
//!
//! Every sensed entity ends with a [`ConsensusState`]: a value (or the
//! `unknown` sentinel), a trend, a narrative, provenance, and a
//! [`Confidence`] label ordered `api_direct > whitelist_direct >
//! cross_validated > unknown`.
//!
//! ## Waterfall
//!
//! Evidence is gathered from progressively less trusted tiers. Open-web
//! evidence is only accepted when at least
//! [`MIN_INDEPENDENT_DOMAINS`](consensus::MIN_INDEPENDENT_DOMAINS)
//! pairwise-distinct domains support the value, counted mechanically by
//! [`consensus::cross_validate`].

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod consensus;
pub mod core;
pub mod entity;
pub mod evidence;
pub mod oracle;
pub mod prompt;
pub mod quote;
pub mod routing;
pub mod state;
pub mod whitelist;

// Re-export commonly used types
pub use assembler::{ConsensusPayload, StateAssembler};
pub use catalog::{LabelHit, LabelIndex, LabelMatch, default_fred_series, default_symbols};
pub use config::OutputFormat;
pub use consensus::{CandidateValue, CrossValidation, MIN_INDEPENDENT_DOMAINS, cross_validate};
pub use core::error::SensingError;
pub use entity::{BatchSummary, EnrichedEntity, Entity};
pub use evidence::{Attempt, EvidenceSet, SearchResult};
pub use oracle::{ExtractionMode, OracleExtraction, ParseError, parse_oracle_response};
pub use prompt::PromptTemplate;
pub use quote::{DirectQuote, StructuredObservation};
pub use routing::{ResolvedRoute, RouteMatch, RoutingRule, RoutingTable, Strategy};
pub use state::{
    Confidence, ConsensusState, DEFAULT_UNKNOWN_NARRATIVE, SourceKind, SourceRef, Trend,
    UNKNOWN_VALUE,
};
pub use whitelist::{DomainWhitelist, WhitelistCategory, filter_by_domains};
