//! State assembly: provider payloads → [`ConsensusState`].
//!
//! Pure mapping. Every successful strategy ends here so the canonical record
//! has one shape regardless of where the value came from.

use crate::quote::{DirectQuote, StructuredObservation, format_change_percent};
use crate::routing::Strategy;
use crate::state::{Confidence, ConsensusState, DEFAULT_UNKNOWN_NARRATIVE, SourceRef, Trend};

/// An adjudicated consensus result, before labelling.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusPayload {
    pub value: String,
    pub trend: Trend,
    pub narrative_context: String,
    pub sources: Vec<SourceRef>,
}

pub struct StateAssembler;

impl StateAssembler {
    pub fn from_quote(quote: &DirectQuote) -> ConsensusState {
        let value = quote.display_value();
        let change = quote.change_percent().map(format_change_percent);
        let narrative_context = match &change {
            Some(change) => format!(
                "{} ({}) last traded at {}, {} vs previous close",
                quote.asset_name, quote.symbol, value, change
            ),
            None => format!("{} ({}) last traded at {}", quote.asset_name, quote.symbol, value),
        };

        ConsensusState {
            value,
            trend: quote.trend(),
            narrative_context,
            confidence: Confidence::ApiDirect,
            sources: vec![quote.source.clone()],
            change_percent: change,
            strategy_used: Some(Strategy::DirectQuote),
        }
    }

    pub fn from_observation(observation: &StructuredObservation) -> ConsensusState {
        let value = observation.display_value();
        let as_of = observation
            .observed_on
            .map(|d| format!(" as of {}", d))
            .unwrap_or_default();

        ConsensusState {
            narrative_context: format!(
                "{} ({}) at {}{}",
                observation.title, observation.series_id, value, as_of
            ),
            value,
            trend: observation.trend(),
            confidence: Confidence::ApiDirect,
            sources: vec![observation.source.clone()],
            change_percent: observation.change_percent().map(format_change_percent),
            strategy_used: Some(Strategy::StructuredApi),
        }
    }

    /// Label an adjudicated payload.
    ///
    /// An unknown payload keeps the confidence label for diagnostics but
    /// carries no sources.
    pub fn from_consensus(payload: ConsensusPayload, confidence: Confidence) -> ConsensusState {
        let mut state = if crate::state::is_unknown_value(&payload.value) {
            let narrative = if payload.narrative_context.trim().is_empty() {
                DEFAULT_UNKNOWN_NARRATIVE.to_string()
            } else {
                payload.narrative_context
            };
            ConsensusState::unknown(confidence, narrative)
        } else {
            ConsensusState {
                value: payload.value.trim().to_string(),
                trend: payload.trend,
                narrative_context: payload.narrative_context,
                confidence,
                sources: payload.sources,
                change_percent: None,
                strategy_used: None,
            }
        };
        state.strategy_used = Some(Strategy::NewsSearch);
        state
    }
}
