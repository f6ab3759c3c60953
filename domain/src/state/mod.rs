//! State records produced by the sensing pipeline.
//!
//! - [`ConsensusState`]: value, trend, narrative, confidence, sources
//! - [`Confidence`]: strict trust order `api_direct > whitelist_direct > cross_validated > unknown`
//! - [`SourceRef`]: provenance entry

mod confidence;
mod consensus_state;
mod source;

pub use confidence::{Confidence, Trend};
pub use consensus_state::{
    ConsensusState, DEFAULT_UNKNOWN_NARRATIVE, UNKNOWN_VALUE, is_unknown_value,
};
pub use source::{SourceKind, SourceRef};
