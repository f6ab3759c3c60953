//! Enrich Nodes use case
//!
//! Per entity, strictly in order:
//!
//! 1. Direct quote lookup by label. A hit is final (`api_direct`) and no
//!    search is issued.
//! 2. Routing: the rule for the entity type (or the synthesized default,
//!    logged as a routing gap).
//! 3. The rule's strategies in order: structured API providers, then the
//!    consensus waterfall.
//!
//! Batches run entities in parallel under a semaphore. Any per-entity
//! failure, including a panicked task, becomes an `unknown` state for that
//! entity only; output order and length always match the input.

use crate::config::SensingParams;
use crate::ports::progress::{EnrichmentProgress, NoProgress};
use crate::use_cases::lookup_quote::LookupQuoteUseCase;
use crate::use_cases::lookup_structured::LookupStructuredUseCase;
use crate::use_cases::validate_consensus::ValidateConsensusUseCase;
use chrono::Utc;
use sensing_domain::{
    BatchSummary, Confidence, ConsensusState, EnrichedEntity, Entity, RoutingTable, SensingError,
    StateAssembler, Strategy,
};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

const TASK_FAILED_NARRATIVE: &str = "Enrichment task failed before producing a state";

/// Use case for enriching entities with their current state
#[derive(Clone)]
pub struct EnrichNodesUseCase {
    quotes: Option<LookupQuoteUseCase>,
    structured: LookupStructuredUseCase,
    validator: ValidateConsensusUseCase,
    routing: Arc<RoutingTable>,
    params: SensingParams,
    progress: Arc<dyn EnrichmentProgress>,
}

impl EnrichNodesUseCase {
    pub fn new(
        validator: ValidateConsensusUseCase,
        routing: Arc<RoutingTable>,
        params: SensingParams,
    ) -> Self {
        Self {
            quotes: None,
            structured: LookupStructuredUseCase::default(),
            validator,
            routing,
            params,
            progress: Arc::new(NoProgress),
        }
    }

    pub fn with_quotes(mut self, quotes: LookupQuoteUseCase) -> Self {
        self.quotes = Some(quotes);
        self
    }

    pub fn with_structured(mut self, structured: LookupStructuredUseCase) -> Self {
        self.structured = structured;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn EnrichmentProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Enrich a single entity.
    ///
    /// An entity without queries is returned unchanged with no state.
    pub async fn enrich_one(&self, entity: Entity) -> EnrichedEntity {
        if !entity.has_queries() {
            info!("Entity '{}' declares no queries, not attempted", entity.id);
            let enriched = EnrichedEntity::not_attempted(entity);
            self.progress.on_entity_complete(&enriched);
            return enriched;
        }

        self.progress.on_entity_start(&entity);
        let state = self.sense(&entity).await;
        info!(
            "Entity '{}' ({}): {} [{}]",
            entity.id, entity.label, state.value, state.confidence
        );

        let enriched = EnrichedEntity::observed(entity, state, Utc::now());
        self.progress.on_entity_complete(&enriched);
        enriched
    }

    async fn sense(&self, entity: &Entity) -> ConsensusState {
        if let Some(quotes) = &self.quotes
            && let Some(quote) = quotes.execute(&entity.label).await
        {
            return StateAssembler::from_quote(&quote);
        }

        let route = self.routing.resolve(&entity.entity_type);
        if route.is_gap() {
            warn!(
                "{}; using default news-search rule",
                SensingError::ConfigurationGap(entity.entity_type.clone())
            );
        }
        let rule = route.rule;

        let mut last_error = None;
        for strategy in rule.strategy_order() {
            match strategy {
                // Already attempted above.
                Strategy::DirectQuote => {
                    last_error = Some(SensingError::ProviderUnavailable(format!(
                        "no direct quote for '{}'",
                        entity.label
                    )));
                }
                Strategy::StructuredApi => {
                    match self
                        .structured
                        .execute(&entity.label, &rule.preferred_providers)
                        .await
                    {
                        Some(observation) => return StateAssembler::from_observation(&observation),
                        None => {
                            warn!(
                                "No structured data for '{}', trying next strategy",
                                entity.label
                            );
                            last_error = Some(SensingError::ProviderUnavailable(format!(
                                "no structured provider returned data for '{}'",
                                entity.label
                            )));
                        }
                    }
                }
                Strategy::NewsSearch => {
                    return self
                        .validator
                        .execute(&entity.label, &entity.declared_queries, rule)
                        .await
                        .state;
                }
            }
        }

        let err = last_error.unwrap_or_else(|| {
            SensingError::ProviderUnavailable(format!("no strategy applies to '{}'", entity.label))
        });
        warn!("Entity '{}': {}", entity.id, err);
        ConsensusState::unknown(Confidence::Unknown, err.narrative())
    }

    /// Enrich a batch with bounded concurrency.
    pub async fn enrich_batch(&self, entities: Vec<Entity>) -> Vec<EnrichedEntity> {
        let total = entities.len();
        self.progress.on_batch_start(total);
        info!(
            "Enriching {} entities (max concurrency {})",
            total,
            self.params.effective_concurrency()
        );

        let semaphore = Arc::new(Semaphore::new(self.params.effective_concurrency()));
        let mut join_set = JoinSet::new();
        let mut slots: Vec<Option<EnrichedEntity>> = (0..total).map(|_| None).collect();

        for (index, entity) in entities.iter().cloned().enumerate() {
            let this = self.clone();
            let semaphore = Arc::clone(&semaphore);
            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                (index, this.enrich_one(entity).await)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, enriched)) => slots[index] = Some(enriched),
                Err(e) => error!("Enrichment task failed: {}", e),
            }
        }

        let results: Vec<EnrichedEntity> = slots
            .into_iter()
            .zip(entities)
            .map(|(slot, entity)| {
                slot.unwrap_or_else(|| {
                    let enriched = EnrichedEntity::observed(
                        entity,
                        ConsensusState::unknown(Confidence::Unknown, TASK_FAILED_NARRATIVE),
                        Utc::now(),
                    );
                    self.progress.on_entity_complete(&enriched);
                    enriched
                })
            })
            .collect();

        let summary = BatchSummary::from_results(&results);
        info!(
            "Batch complete: {}/{} succeeded",
            summary.succeeded_count, summary.total
        );
        self.progress.on_batch_complete(&summary);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuoteRetryParams;
    use crate::ports::structured_provider::StructuredProvider;
    use crate::use_cases::testing::{
        MockOracle, MockQuotes, MockSearch, MockStructured, extraction, fed_funds_observation,
        gold_quote, hit,
    };
    use sensing_domain::{
        DomainWhitelist, RoutingRule, Trend, WhitelistCategory, default_symbols,
    };
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    fn routing() -> Arc<RoutingTable> {
        let whitelist = DomainWhitelist::new(vec![WhitelistCategory::new(
            "wires",
            ["reuters.com", "bloomberg.com", "federalreserve.gov"],
        )]);
        let mut rules = HashMap::new();
        rules.insert(
            "macro_indicator".to_string(),
            RoutingRule {
                primary_strategy: Strategy::StructuredApi,
                fallback_strategy: Some(Strategy::NewsSearch),
                preferred_providers: vec!["fred".into()],
                tier1_domains: vec!["federalreserve.gov".into()],
                tier2_domains: vec!["reuters.com".into()],
            },
        );
        Arc::new(RoutingTable::new(rules, &whitelist))
    }

    struct Harness {
        search: Arc<MockSearch>,
        quotes: Arc<MockQuotes>,
        use_case: EnrichNodesUseCase,
    }

    fn harness(search: MockSearch, oracle: MockOracle, quotes: MockQuotes) -> Harness {
        let search = Arc::new(search);
        let quotes = Arc::new(quotes);
        let validator = ValidateConsensusUseCase::new(
            search.clone(),
            Arc::new(oracle),
            SensingParams::default(),
        );
        let lookup = LookupQuoteUseCase::new(
            quotes.clone(),
            Arc::new(default_symbols()),
            QuoteRetryParams::default().with_backoff_base(Duration::from_millis(1)),
        );
        let use_case = EnrichNodesUseCase::new(validator, routing(), SensingParams::default())
            .with_quotes(lookup);
        Harness {
            search,
            quotes,
            use_case,
        }
    }

    fn entity(id: &str, label: &str, entity_type: &str) -> Entity {
        Entity::new(id, label, entity_type, [format!("{} latest", label)])
    }

    #[tokio::test]
    async fn test_quote_hit_bypasses_search() {
        let h = harness(
            MockSearch::tiered(vec![hit("https://reuters.com/a", "x")], vec![]),
            MockOracle::answering(extraction("1999 USD", &[])),
            MockQuotes::new(vec![Ok(Some(gold_quote()))]),
        );

        let enriched = h.use_case.enrich_one(entity("n1", "黄金价格", "cause")).await;
        let state = enriched.current_state.as_ref().unwrap();
        assert_eq!(state.value, "2025.00 USD");
        assert_eq!(state.confidence, Confidence::ApiDirect);
        assert_eq!(state.trend, Trend::Rising);
        assert!(enriched.observed_at.is_some());
        assert_eq!(h.search.call_count(), 0);
        assert_eq!(h.quotes.call_count(), 1);
    }

    #[tokio::test]
    async fn test_quote_miss_runs_waterfall_with_gap() {
        let h = harness(
            MockSearch::tiered(
                vec![
                    hit("https://www.reuters.com/a", "5.25%-5.50%"),
                    hit("https://bloomberg.com/b", "5.25%-5.50%"),
                ],
                vec![],
            ),
            MockOracle::answering(extraction("5.25%-5.50%", &["https://www.reuters.com/a"])),
            MockQuotes::new(vec![]),
        );

        // "cause" has no rule: default tiers come from the whitelist.
        let enriched = h.use_case.enrich_one(entity("n2", "美联储利率", "cause")).await;
        let state = enriched.current_state.unwrap();
        assert_eq!(state.value, "5.25%-5.50%");
        assert_eq!(state.confidence, Confidence::WhitelistDirect);
        assert_eq!(h.quotes.call_count(), 0);
    }

    #[tokio::test]
    async fn test_structured_rule_uses_provider() {
        let fred = Arc::new(MockStructured::new("fred", Ok(Some(fed_funds_observation()))));
        let mut h = harness(
            MockSearch::empty(),
            MockOracle::answering(extraction("x", &[])),
            MockQuotes::new(vec![]),
        );
        h.use_case = h
            .use_case
            .with_structured(LookupStructuredUseCase::new(vec![
                fred.clone() as Arc<dyn StructuredProvider>
            ]));

        let enriched = h
            .use_case
            .enrich_one(entity("n3", "美联储利率", "macro_indicator"))
            .await;
        let state = enriched.current_state.unwrap();
        assert_eq!(state.value, "5.33%");
        assert_eq!(state.confidence, Confidence::ApiDirect);
        assert_eq!(state.strategy_used, Some(Strategy::StructuredApi));
        assert_eq!(h.search.call_count(), 0);
    }

    #[tokio::test]
    async fn test_structured_miss_falls_back_to_news() {
        let h = harness(
            MockSearch::empty(),
            MockOracle::answering(extraction("x", &[])),
            MockQuotes::new(vec![]),
        );
        let enriched = h
            .use_case
            .enrich_one(entity("n3", "美联储利率", "macro_indicator"))
            .await;
        let state = enriched.current_state.unwrap();
        assert!(state.is_unknown());
        assert_eq!(state.confidence, Confidence::CrossValidated);
        assert!(h.search.call_count() > 0);
    }

    #[tokio::test]
    async fn test_no_queries_not_attempted() {
        let h = harness(
            MockSearch::empty(),
            MockOracle::answering(extraction("x", &[])),
            MockQuotes::new(vec![Ok(Some(gold_quote()))]),
        );
        let bare = Entity::new("n4", "黄金价格", "cause", Vec::<String>::new());
        let enriched = h.use_case.enrich_one(bare.clone()).await;
        assert!(enriched.current_state.is_none());
        assert!(enriched.observed_at.is_none());
        assert_eq!(enriched.entity, bare);
        assert_eq!(h.quotes.call_count(), 0);
    }

    #[tokio::test]
    async fn test_batch_preserves_order_despite_failures() {
        let oracle = MockOracle::new(|label, _, _| {
            if label == "panics" {
                panic!("oracle blew up");
            }
            Err(crate::ports::reasoning_oracle::OracleError::Timeout)
        });
        let h = harness(
            MockSearch::new(|_, _| Ok(vec![hit("https://reuters.com/a", "x")])),
            oracle,
            MockQuotes::new(vec![Ok(Some(gold_quote()))]),
        );

        let input = vec![
            entity("a", "美联储利率", "cause"),
            entity("b", "panics", "cause"),
            Entity::new("c", "nothing", "cause", Vec::<String>::new()),
            entity("d", "黄金价格", "cause"),
            entity("e", "美国失业率", "macro_indicator"),
        ];
        let results = h.use_case.enrich_batch(input.clone()).await;

        assert_eq!(results.len(), input.len());
        let ids: Vec<&str> = results.iter().map(|r| r.entity.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);

        let b = results[1].current_state.as_ref().unwrap();
        assert!(b.is_unknown());
        assert_eq!(b.confidence, Confidence::Unknown);
        assert_eq!(b.narrative_context, TASK_FAILED_NARRATIVE);

        assert!(results[2].current_state.is_none());
        assert!(results[3].is_success());
        assert!(!results[0].is_success());
        assert!(!results[4].is_success());

        assert_eq!(BatchSummary::from_results(&results).succeeded_count, 1);
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl EnrichmentProgress for RecordingProgress {
        fn on_batch_start(&self, total: usize) {
            self.events.lock().unwrap().push(format!("start:{}", total));
        }

        fn on_entity_complete(&self, entity: &EnrichedEntity) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done:{}", entity.entity.id));
        }

        fn on_batch_complete(&self, summary: &BatchSummary) {
            self.events
                .lock()
                .unwrap()
                .push(format!("end:{}/{}", summary.succeeded_count, summary.total));
        }
    }

    #[tokio::test]
    async fn test_batch_reports_progress() {
        let progress = Arc::new(RecordingProgress::default());
        let mut h = harness(
            MockSearch::empty(),
            MockOracle::answering(extraction("x", &[])),
            MockQuotes::new(vec![Ok(Some(gold_quote()))]),
        );
        h.use_case = h.use_case.with_progress(progress.clone());

        h.use_case
            .enrich_batch(vec![entity("g", "gold", "cause"), entity("f", "fed", "cause")])
            .await;

        let events = progress.events.lock().unwrap().clone();
        assert_eq!(events.first().map(String::as_str), Some("start:2"));
        assert_eq!(events.last().map(String::as_str), Some("end:1/2"));
        assert_eq!(events.iter().filter(|e| e.starts_with("done:")).count(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrency_is_bounded() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (f, p) = (in_flight.clone(), peak.clone());
        let search = MockSearch::new(move |_, _| {
            let now = f.fetch_add(1, Ordering::SeqCst) + 1;
            p.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(5));
            f.fetch_sub(1, Ordering::SeqCst);
            Ok(vec![])
        });
        let h = harness(
            search,
            MockOracle::answering(extraction("x", &[])),
            MockQuotes::new(vec![]),
        );
        let use_case = h.use_case.clone();
        let params = SensingParams::default().with_max_concurrency(2);
        let bounded = EnrichNodesUseCase { params, ..use_case };

        let entities: Vec<Entity> = (0..8)
            .map(|i| Entity::new(format!("n{}", i), format!("label {}", i), "cause", ["q"]))
            .collect();
        let results = bounded.enrich_batch(entities).await;
        assert_eq!(results.len(), 8);
        // One query per entity, so each permit holder has at most one search in flight.
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }
}
