//! The canonical state record attached to an entity.

use super::confidence::{Confidence, Trend};
use super::source::SourceRef;
use crate::consensus::distinct_domain_count;
use crate::routing::Strategy;
use serde::{Deserialize, Serialize};

/// Sentinel value meaning "no definite value could be established".
pub const UNKNOWN_VALUE: &str = "unknown";

/// Narrative used when nothing more specific is known.
pub const DEFAULT_UNKNOWN_NARRATIVE: &str = "Not enough information to determine the current state";

/// Canonical state of an entity at observation time.
///
/// `value == "unknown"` is a normal outcome, not an error. The confidence
/// label is kept on unknown states for diagnostics (e.g. an unknown with
/// `cross_validated` means the open-web attempt ran and was rejected).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusState {
    pub value: String,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default)]
    pub narrative_context: String,
    #[serde(default)]
    pub confidence: Confidence,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
    /// Signed day-over-day change (e.g. `+1.23%`), when the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<String>,
    /// Strategy that produced this state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_used: Option<Strategy>,
}

impl ConsensusState {
    /// The unknown sentinel with a given confidence and narrative.
    pub fn unknown(confidence: Confidence, narrative: impl Into<String>) -> Self {
        Self {
            value: UNKNOWN_VALUE.to_string(),
            trend: Trend::Stable,
            narrative_context: narrative.into(),
            confidence,
            sources: Vec::new(),
            change_percent: None,
            strategy_used: None,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy_used = Some(strategy);
        self
    }

    pub fn is_unknown(&self) -> bool {
        is_unknown_value(&self.value)
    }

    /// A state counts as a success when it carries a trusted, definite value.
    pub fn is_success(&self) -> bool {
        self.confidence != Confidence::Unknown && !self.is_unknown()
    }

    /// Number of pairwise-distinct domains among `sources`.
    pub fn distinct_source_domains(&self) -> usize {
        distinct_domain_count(&self.sources)
    }

    /// Checks the anti-fabrication invariant: a definite cross-validated value
    /// is backed by at least three distinct domains.
    pub fn upholds_cross_validation(&self) -> bool {
        if self.confidence != Confidence::CrossValidated || self.is_unknown() {
            return true;
        }
        self.distinct_source_domains() >= crate::consensus::MIN_INDEPENDENT_DOMAINS
    }
}

/// Whether a raw value string denotes the unknown sentinel.
pub fn is_unknown_value(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v.eq_ignore_ascii_case(UNKNOWN_VALUE)
}
