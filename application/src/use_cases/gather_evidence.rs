//! Gather Evidence use case
//!
//! Runs all queries for one waterfall attempt concurrently, merges the hits in
//! query order, deduplicates by URL and applies the domain filter.

use crate::ports::search_provider::{SearchOptions, SearchProvider};
use futures::future::join_all;
use sensing_domain::{Attempt, EvidenceSet, filter_by_domains};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Input for one gather call
#[derive(Debug, Clone)]
pub struct GatherEvidenceInput<'a> {
    pub queries: &'a [String],
    /// Allowed domains; empty passes everything.
    pub domain_filter: &'a [String],
    pub attempt: Attempt,
    pub options: SearchOptions,
    /// Cap on the merged evidence set.
    pub limit: Option<usize>,
}

/// Use case for concurrent multi-query search
#[derive(Clone)]
pub struct GatherEvidenceUseCase {
    search: Arc<dyn SearchProvider>,
}

impl GatherEvidenceUseCase {
    pub fn new(search: Arc<dyn SearchProvider>) -> Self {
        Self { search }
    }

    /// Execute the gather. Never fails: failed queries are logged and
    /// excluded, so the result may be partial or empty.
    pub async fn execute(&self, input: GatherEvidenceInput<'_>) -> EvidenceSet {
        let queries: Vec<&str> = input
            .queries
            .iter()
            .map(|q| q.trim())
            .filter(|q| !q.is_empty())
            .collect();

        if queries.is_empty() {
            return EvidenceSet::empty(input.attempt);
        }

        let options = &input.options;
        let calls = queries.iter().map(|query| async move {
            let outcome = self.search.search(query, options).await;
            (*query, outcome)
        });

        let mut merged = Vec::new();
        let mut failed = 0usize;
        for (query, outcome) in join_all(calls).await {
            match outcome {
                Ok(results) => {
                    debug!(
                        "Attempt {} query '{}' returned {} results",
                        input.attempt.number(),
                        query,
                        results.len()
                    );
                    merged.extend(results);
                }
                Err(e) => {
                    failed += 1;
                    warn!(
                        "Search via {} failed for query '{}': {}",
                        self.search.name(),
                        query,
                        e
                    );
                }
            }
        }

        let raw_count = merged.len();
        let filtered = filter_by_domains(merged, input.domain_filter);
        if !input.domain_filter.is_empty() {
            debug!(
                "Domain filter kept {}/{} results",
                filtered.len(),
                raw_count
            );
        }

        let mut evidence = EvidenceSet::new(input.attempt, filtered);
        if let Some(limit) = input.limit {
            evidence = evidence.truncated(limit);
        }

        info!(
            "Attempt {}: {} queries ({} failed), {} evidence items",
            input.attempt.number(),
            queries.len(),
            failed,
            evidence.len()
        );

        evidence
    }
}
