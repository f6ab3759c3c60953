//! Mechanical cross-validation of oracle candidates.
//!
//! The oracle's own claim of agreement is never trusted. For every candidate
//! value the sources are first grounded against the evidence that was
//! actually shown to the oracle (sources whose URL is not in the evidence are
//! discarded), then the distinct domains are counted. A candidate is accepted
//! only with at least [`MIN_INDEPENDENT_DOMAINS`] of them.

use crate::evidence::EvidenceSet;
use crate::state::{SourceRef, is_unknown_value};
use std::collections::HashSet;

/// Minimum number of pairwise-distinct domains for a cross-validated value.
pub const MIN_INDEPENDENT_DOMAINS: usize = 3;

/// Count pairwise-distinct effective domains among `sources`.
///
/// Sources without any resolvable domain do not count.
pub fn distinct_domain_count(sources: &[SourceRef]) -> usize {
    sources
        .iter()
        .filter_map(SourceRef::effective_domain)
        .collect::<HashSet<_>>()
        .len()
}

/// A value proposed by the oracle together with the sources it cites.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateValue {
    pub value: String,
    pub sources: Vec<SourceRef>,
}

impl CandidateValue {
    pub fn new(value: impl Into<String>, sources: Vec<SourceRef>) -> Self {
        Self {
            value: value.into(),
            sources,
        }
    }
}

/// Outcome of [`cross_validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum CrossValidation {
    Accepted {
        value: String,
        sources: Vec<SourceRef>,
        distinct_domains: usize,
        /// Index of the winning candidate in the input slice.
        candidate_index: usize,
    },
    Rejected {
        /// Highest distinct-domain count any candidate reached.
        best_distinct_domains: usize,
        /// Sources the oracle cited that were not in the evidence.
        ungrounded_sources: usize,
    },
}

impl CrossValidation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CrossValidation::Accepted { .. })
    }
}

/// Keep only sources that point at evidence items, rewritten from the
/// evidence (so titles and domains cannot be invented), deduplicated by URL.
///
/// Returns the grounded sources and the number discarded.
pub fn ground_sources(sources: &[SourceRef], evidence: &EvidenceSet) -> (Vec<SourceRef>, usize) {
    let mut grounded = Vec::new();
    let mut seen = HashSet::new();
    let mut discarded = 0;

    for source in sources {
        match find_evidence(evidence, &source.url) {
            Some(hit) => {
                if seen.insert(hit.url.clone()) {
                    grounded.push(SourceRef::from(hit));
                }
            }
            None => discarded += 1,
        }
    }

    (grounded, discarded)
}

fn find_evidence<'a>(
    evidence: &'a EvidenceSet,
    url: &str,
) -> Option<&'a crate::evidence::SearchResult> {
    let wanted = canonical_url(url);
    if wanted.is_empty() {
        return None;
    }
    evidence
        .results()
        .iter()
        .find(|r| canonical_url(&r.url) == wanted)
}

fn canonical_url(url: &str) -> &str {
    url.trim().trim_end_matches('/')
}

/// Pick the accepted value among the candidates.
///
/// Every candidate with a definite value is grounded and counted. Among
/// those reaching the threshold, the one with the most distinct domains
/// wins; ties go to the earliest candidate.
pub fn cross_validate(candidates: &[CandidateValue], evidence: &EvidenceSet) -> CrossValidation {
    let mut best: Option<(usize, Vec<SourceRef>, usize)> = None;
    let mut best_seen = 0;
    let mut ungrounded_total = 0;

    for (index, candidate) in candidates.iter().enumerate() {
        if is_unknown_value(&candidate.value) {
            continue;
        }
        let (grounded, discarded) = ground_sources(&candidate.sources, evidence);
        ungrounded_total += discarded;

        let count = distinct_domain_count(&grounded);
        best_seen = best_seen.max(count);

        if count < MIN_INDEPENDENT_DOMAINS {
            continue;
        }
        let better = match &best {
            Some((_, _, best_count)) => count > *best_count,
            None => true,
        };
        if better {
            best = Some((index, grounded, count));
        }
    }

    match best {
        Some((candidate_index, sources, distinct_domains)) => CrossValidation::Accepted {
            value: candidates[candidate_index].value.trim().to_string(),
            sources,
            distinct_domains,
            candidate_index,
        },
        None => CrossValidation::Rejected {
            best_distinct_domains: best_seen,
            ungrounded_sources: ungrounded_total,
        },
    }
}
