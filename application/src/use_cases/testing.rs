//! Hand-written port mocks shared by use case tests.

use crate::ports::quote_provider::{QuoteError, QuoteProvider};
use crate::ports::reasoning_oracle::{OracleError, ReasoningOracle};
use crate::ports::search_provider::{SearchError, SearchOptions, SearchProvider};
use crate::ports::structured_provider::{StructuredError, StructuredProvider};
use async_trait::async_trait;
use sensing_domain::{
    DirectQuote, EvidenceSet, ExtractionMode, OracleExtraction, SearchResult, SourceKind,
    SourceRef, StructuredObservation, Trend,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

// ==================== Search ====================

type SearchFn =
    dyn Fn(&str, &SearchOptions) -> Result<Vec<SearchResult>, SearchError> + Send + Sync;

pub(crate) struct MockSearch {
    respond: Box<SearchFn>,
    calls: Mutex<Vec<(String, SearchOptions)>>,
}

impl MockSearch {
    pub(crate) fn new(
        respond: impl Fn(&str, &SearchOptions) -> Result<Vec<SearchResult>, SearchError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Whitelist-scoped calls (non-empty `include_domains`) get `whitelist`,
    /// open-web calls get `open_web`.
    pub(crate) fn tiered(whitelist: Vec<SearchResult>, open_web: Vec<SearchResult>) -> Self {
        Self::new(move |_, options| {
            if options.include_domains.is_empty() {
                Ok(open_web.clone())
            } else {
                Ok(whitelist.clone())
            }
        })
    }

    pub(crate) fn empty() -> Self {
        Self::new(|_, _| Ok(Vec::new()))
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls(&self) -> Vec<(String, SearchOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), options.clone()));
        (self.respond)(query, options)
    }
}

// ==================== Oracle ====================

type OracleFn = dyn Fn(&str, &EvidenceSet, ExtractionMode) -> Result<OracleExtraction, OracleError>
    + Send
    + Sync;

pub(crate) struct MockOracle {
    respond: Box<OracleFn>,
    modes: Mutex<Vec<ExtractionMode>>,
}

impl MockOracle {
    pub(crate) fn new(
        respond: impl Fn(&str, &EvidenceSet, ExtractionMode) -> Result<OracleExtraction, OracleError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            modes: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with the same extraction.
    pub(crate) fn answering(extraction: OracleExtraction) -> Self {
        Self::new(move |_, _, _| Ok(extraction.clone()))
    }

    pub(crate) fn modes(&self) -> Vec<ExtractionMode> {
        self.modes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReasoningOracle for MockOracle {
    async fn extract(
        &self,
        label: &str,
        evidence: &EvidenceSet,
        mode: ExtractionMode,
    ) -> Result<OracleExtraction, OracleError> {
        self.modes.lock().unwrap().push(mode);
        (self.respond)(label, evidence, mode)
    }
}

// ==================== Quotes ====================

pub(crate) struct MockQuotes {
    responses: Mutex<VecDeque<Result<Option<DirectQuote>, QuoteError>>>,
    calls: AtomicUsize,
}

impl MockQuotes {
    /// Responses are served in order; once exhausted every call is `Ok(None)`.
    pub(crate) fn new(responses: Vec<Result<Option<DirectQuote>, QuoteError>>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteProvider for MockQuotes {
    fn name(&self) -> &str {
        "mock-quotes"
    }

    async fn quote(&self, _symbol: &str) -> Result<Option<DirectQuote>, QuoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }
}

// ==================== Structured ====================

pub(crate) struct MockStructured {
    name: String,
    response: Result<Option<StructuredObservation>, StructuredError>,
    calls: AtomicUsize,
}

impl MockStructured {
    pub(crate) fn new(
        name: &str,
        response: Result<Option<StructuredObservation>, StructuredError>,
    ) -> Self {
        Self {
            name: name.to_string(),
            response,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StructuredProvider for MockStructured {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, _label: &str) -> Result<Option<StructuredObservation>, StructuredError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

// ==================== Fixtures ====================

pub(crate) fn hit(url: &str, snippet: &str) -> SearchResult {
    SearchResult::new(format!("Report on {}", url), url, snippet)
}

/// Extraction citing the given URLs as sources.
pub(crate) fn extraction(value: &str, urls: &[&str]) -> OracleExtraction {
    OracleExtraction {
        value: value.to_string(),
        trend: Trend::Stable,
        narrative_context: format!("Sources report {}", value),
        claimed_confidence: None,
        sources: urls
            .iter()
            .map(|u| SourceRef::new("cited", *u, SourceKind::NewsSearch))
            .collect(),
        candidates: Vec::new(),
    }
}

pub(crate) fn gold_quote() -> DirectQuote {
    DirectQuote {
        symbol: "GC=F".into(),
        asset_name: "Gold".into(),
        price: 2025.0,
        currency: "USD".into(),
        previous_close: Some(2000.0),
        source: SourceRef::new(
            "Yahoo Finance - Gold",
            "https://finance.yahoo.com/quote/GC=F",
            SourceKind::DirectApi,
        ),
    }
}

pub(crate) fn fed_funds_observation() -> StructuredObservation {
    StructuredObservation {
        provider: "fred".into(),
        series_id: "DFF".into(),
        title: "Federal Funds Effective Rate".into(),
        value: 5.33,
        units: "Percent".into(),
        previous_value: Some(5.33),
        observed_on: None,
        source: SourceRef::new(
            "FRED - Federal Funds Effective Rate",
            "https://fred.stlouisfed.org/series/DFF",
            SourceKind::StructuredApi,
        ),
    }
}
