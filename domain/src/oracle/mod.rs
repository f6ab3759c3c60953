//! Oracle extraction contract: modes, the parsed response model, and the
//! parser that turns free-form model output into it.

mod parsing;

pub use parsing::{ParseError, parse_oracle_response};

use crate::consensus::CandidateValue;
use crate::state::{Confidence, SourceRef, Trend, is_unknown_value};
use serde::{Deserialize, Serialize};

/// How the oracle is asked to read the evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Whitelisted evidence: extract directly.
    Direct,
    /// Open-web evidence: value must agree across independent domains.
    CrossValidate,
}

impl ExtractionMode {
    /// Maximum number of grounded sources credited to a state, if capped.
    pub fn source_cap(&self) -> Option<usize> {
        match self {
            ExtractionMode::Direct => Some(3),
            ExtractionMode::CrossValidate => None,
        }
    }

    /// The confidence label a successful extraction in this mode earns.
    pub fn confidence(&self) -> Confidence {
        match self {
            ExtractionMode::Direct => Confidence::WhitelistDirect,
            ExtractionMode::CrossValidate => Confidence::CrossValidated,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMode::Direct => "direct",
            ExtractionMode::CrossValidate => "cross_validate",
        }
    }
}

impl std::fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the oracle claims after reading the evidence.
///
/// Everything here is untrusted input. `claimed_confidence` is kept for
/// logging only; sources are re-checked against the evidence downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleExtraction {
    pub value: String,
    pub trend: Trend,
    pub narrative_context: String,
    pub claimed_confidence: Option<Confidence>,
    pub sources: Vec<SourceRef>,
    /// Alternative values with their own support, when the evidence conflicts.
    pub candidates: Vec<CandidateValue>,
}

impl OracleExtraction {
    /// An extraction declaring the unknown sentinel.
    pub fn unknown(narrative: impl Into<String>) -> Self {
        Self {
            value: crate::state::UNKNOWN_VALUE.to_string(),
            trend: Trend::Stable,
            narrative_context: narrative.into(),
            claimed_confidence: None,
            sources: Vec::new(),
            candidates: Vec::new(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        is_unknown_value(&self.value)
    }

    /// The primary value followed by any additional candidates, in listed order.
    ///
    /// A candidate repeating the primary value is skipped.
    pub fn all_candidates(&self) -> Vec<CandidateValue> {
        let mut all = vec![CandidateValue::new(self.value.trim(), self.sources.clone())];
        for candidate in &self.candidates {
            if candidate.value.trim() != self.value.trim() {
                all.push(candidate.clone());
            }
        }
        all
    }
}
