//! Validate Consensus use case
//!
//! Two-attempt waterfall:
//!
//! ```text
//! START → WHITELIST_SEARCH → WHITELIST_EXTRACT → ACCEPTED
//!                                 │ (no evidence / unknown / oracle error)
//!                                 ▼
//!                          FULLWEB_SEARCH → FULLWEB_EXTRACT → ACCEPTED | REJECTED
//! ```
//!
//! Attempt 1 trusts whitelisted domains and takes the oracle's direct
//! extraction. Attempt 2 reads the open web and only accepts a value that
//! [`cross_validate`] confirms across three independent domains; the
//! oracle's own confidence claim is ignored.

use crate::config::SensingParams;
use crate::ports::reasoning_oracle::ReasoningOracle;
use crate::ports::search_provider::{SearchOptions, SearchProvider};
use crate::use_cases::gather_evidence::{GatherEvidenceInput, GatherEvidenceUseCase};
use sensing_domain::consensus::ground_sources;
use sensing_domain::{
    Attempt, Confidence, ConsensusPayload, ConsensusState, CrossValidation, EvidenceSet,
    ExtractionMode, MIN_INDEPENDENT_DOMAINS, RoutingRule, SensingError, SourceRef,
    StateAssembler, Trend, cross_validate,
};
use std::sync::Arc;
use tracing::{info, warn};

const NO_EVIDENCE_NARRATIVE: &str = "No search results in either attempt";

/// Where the waterfall ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStage {
    /// Attempt 1 produced a value.
    AcceptedWhitelist,
    /// Attempt 2 produced a cross-validated value.
    AcceptedOpenWeb,
    /// Attempt 2 ran and did not establish a value.
    Rejected,
    /// Neither attempt found evidence.
    NoEvidence,
}

/// Output of the validator
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub state: ConsensusState,
    pub stage: ValidationStage,
}

/// Use case for the two-stage consensus waterfall
#[derive(Clone)]
pub struct ValidateConsensusUseCase {
    evidence: GatherEvidenceUseCase,
    oracle: Arc<dyn ReasoningOracle>,
    params: SensingParams,
}

impl ValidateConsensusUseCase {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        oracle: Arc<dyn ReasoningOracle>,
        params: SensingParams,
    ) -> Self {
        Self {
            evidence: GatherEvidenceUseCase::new(search),
            oracle,
            params,
        }
    }

    pub async fn execute(
        &self,
        label: &str,
        queries: &[String],
        rule: &RoutingRule,
    ) -> ValidationOutcome {
        let whitelist_hits = match self.whitelist_attempt(label, queries, rule).await {
            WhitelistResult::Accepted(state) => {
                return ValidationOutcome {
                    state,
                    stage: ValidationStage::AcceptedWhitelist,
                };
            }
            WhitelistResult::FallThrough { evidence_count } => evidence_count,
        };

        info!("'{}': falling back to {}", label, Attempt::OpenWeb);
        let evidence = self
            .evidence
            .execute(GatherEvidenceInput {
                queries,
                domain_filter: &[],
                attempt: Attempt::OpenWeb,
                options: SearchOptions::new(self.params.fullweb_max_results)
                    .with_recency_days(self.params.fullweb_recency_days),
                limit: Some(self.params.fullweb_max_results),
            })
            .await;

        if evidence.is_empty() {
            let stage = if whitelist_hits == 0 {
                ValidationStage::NoEvidence
            } else {
                ValidationStage::Rejected
            };
            warn!("'{}': no open-web evidence", label);
            return ValidationOutcome {
                state: StateAssembler::from_consensus(
                    unknown_payload(NO_EVIDENCE_NARRATIVE),
                    Confidence::CrossValidated,
                ),
                stage,
            };
        }

        self.open_web_extract(label, &evidence).await
    }

    async fn whitelist_attempt(
        &self,
        label: &str,
        queries: &[String],
        rule: &RoutingRule,
    ) -> WhitelistResult {
        let scope = rule.whitelist_scope();
        if scope.is_empty() {
            info!(
                "'{}': routing rule has no whitelist domains, skipping {}",
                label,
                Attempt::Whitelist
            );
            return WhitelistResult::FallThrough { evidence_count: 0 };
        }

        let evidence = self
            .evidence
            .execute(GatherEvidenceInput {
                queries,
                domain_filter: &scope,
                attempt: Attempt::Whitelist,
                options: SearchOptions::new(self.params.per_query_results)
                    .with_recency_days(self.params.whitelist_recency_days)
                    .with_include_domains(scope.clone()),
                limit: None,
            })
            .await;

        if evidence.is_empty() {
            info!("'{}': no whitelisted evidence", label);
            return WhitelistResult::FallThrough { evidence_count: 0 };
        }

        let evidence_count = evidence.len();
        match self.oracle.extract(label, &evidence, ExtractionMode::Direct).await {
            Ok(extraction) if !extraction.is_unknown() => {
                let sources = direct_sources(&extraction.sources, &evidence);
                info!(
                    "'{}': accepted '{}' from whitelisted sources ({} cited)",
                    label,
                    extraction.value,
                    sources.len()
                );
                WhitelistResult::Accepted(StateAssembler::from_consensus(
                    ConsensusPayload {
                        value: extraction.value,
                        trend: extraction.trend,
                        narrative_context: extraction.narrative_context,
                        sources,
                    },
                    ExtractionMode::Direct.confidence(),
                ))
            }
            Ok(_) => {
                info!("'{}': oracle declared unknown on whitelisted evidence", label);
                WhitelistResult::FallThrough { evidence_count }
            }
            Err(e) => {
                let err = SensingError::from(e);
                warn!("'{}': whitelist extraction failed: {}", label, err);
                WhitelistResult::FallThrough { evidence_count }
            }
        }
    }

    async fn open_web_extract(&self, label: &str, evidence: &EvidenceSet) -> ValidationOutcome {
        let extraction = match self
            .oracle
            .extract(label, evidence, ExtractionMode::CrossValidate)
            .await
        {
            Ok(extraction) => extraction,
            Err(e) => {
                let err = SensingError::from(e);
                warn!("'{}': open-web extraction failed: {}", label, err);
                return rejected(err.narrative());
            }
        };

        if let Some(claimed) = extraction.claimed_confidence
            && claimed != Confidence::CrossValidated
        {
            warn!("'{}': ignoring oracle confidence claim '{}'", label, claimed);
        }

        match cross_validate(&extraction.all_candidates(), evidence) {
            CrossValidation::Accepted {
                value,
                sources,
                distinct_domains,
                candidate_index,
            } => {
                info!(
                    "'{}': cross-validated '{}' across {} domains",
                    label, value, distinct_domains
                );
                let trend = if candidate_index == 0 {
                    extraction.trend
                } else {
                    Trend::Stable
                };
                ValidationOutcome {
                    state: StateAssembler::from_consensus(
                        ConsensusPayload {
                            value,
                            trend,
                            narrative_context: extraction.narrative_context,
                            sources,
                        },
                        Confidence::CrossValidated,
                    ),
                    stage: ValidationStage::AcceptedOpenWeb,
                }
            }
            CrossValidation::Rejected { .. }
                if extraction.is_unknown() && extraction.candidates.is_empty() =>
            {
                info!("'{}': oracle declared unknown on open-web evidence", label);
                rejected(extraction.narrative_context)
            }
            CrossValidation::Rejected {
                best_distinct_domains,
                ungrounded_sources,
            } => {
                let err = SensingError::ExtractionAmbiguous(format!(
                    "only {} independent domains support the value (need {})",
                    best_distinct_domains, MIN_INDEPENDENT_DOMAINS
                ));
                warn!(
                    "'{}': cross-validation failed, forcing unknown: {} ({} uncited sources discarded)",
                    label, err, ungrounded_sources
                );
                rejected(err.narrative())
            }
        }
    }
}

enum WhitelistResult {
    Accepted(ConsensusState),
    FallThrough { evidence_count: usize },
}

/// Sources for a direct extraction: the cited ones that appear in the
/// evidence, or the top evidence items when none do.
fn direct_sources(cited: &[SourceRef], evidence: &EvidenceSet) -> Vec<SourceRef> {
    let cap = ExtractionMode::Direct.source_cap().unwrap_or(usize::MAX);
    let (mut grounded, _) = ground_sources(cited, evidence);
    if grounded.is_empty() {
        grounded = evidence.results().iter().map(SourceRef::from).collect();
    }
    grounded.truncate(cap);
    grounded
}

fn unknown_payload(narrative: impl Into<String>) -> ConsensusPayload {
    ConsensusPayload {
        value: sensing_domain::UNKNOWN_VALUE.to_string(),
        trend: Trend::Stable,
        narrative_context: narrative.into(),
        sources: Vec::new(),
    }
}

fn rejected(narrative: impl Into<String>) -> ValidationOutcome {
    ValidationOutcome {
        state: StateAssembler::from_consensus(
            unknown_payload(narrative),
            Confidence::CrossValidated,
        ),
        stage: ValidationStage::Rejected,
    }
}
