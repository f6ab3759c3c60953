//! Tavily search adapter
//!
//! `POST https://api.tavily.com/search`. Recency is sent as `topic = "news"`
//! with `days`; the whitelist scope is sent as `include_domains`.

use crate::http::body_excerpt;
use async_trait::async_trait;
use reqwest::StatusCode;
use sensing_application::{SearchError, SearchOptions, SearchProvider};
use sensing_domain::SearchResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

const TAVILY_API_URL: &str = "https://api.tavily.com/search";

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'static str,
    max_results: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    days: Option<u32>,
    #[serde(skip_serializing_if = "no_domains")]
    include_domains: &'a [String],
}

fn no_domains(domains: &&[String]) -> bool {
    domains.is_empty()
}

#[derive(Debug, Default, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyHit>,
}

#[derive(Debug, Deserialize)]
struct TavilyHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

pub struct TavilySearchProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TavilySearchProvider {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: TAVILY_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

fn request_body<'a>(
    api_key: &'a str,
    query: &'a str,
    options: &'a SearchOptions,
) -> TavilyRequest<'a> {
    TavilyRequest {
        api_key,
        query,
        search_depth: "basic",
        max_results: options.max_results,
        topic: options.recency_days.map(|_| "news"),
        days: options.recency_days,
        include_domains: &options.include_domains,
    }
}

fn parse_response(body: &str) -> Result<Vec<SearchResult>, SearchError> {
    let response: TavilyResponse =
        serde_json::from_str(body).map_err(|e| SearchError::InvalidResponse(e.to_string()))?;
    Ok(response
        .results
        .into_iter()
        .filter(|hit| !hit.url.trim().is_empty())
        .map(|hit| SearchResult::new(hit.title, hit.url.trim(), hit.content))
        .collect())
}

pub(crate) fn map_transport_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout
    } else {
        SearchError::RequestFailed(e.to_string())
    }
}

pub(crate) fn map_status(provider: &str, status: StatusCode, body: &str) -> SearchError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        SearchError::RateLimited
    } else {
        SearchError::RequestFailed(format!(
            "{} returned {}: {}",
            provider,
            status,
            body_excerpt(body)
        ))
    }
}

#[async_trait]
impl SearchProvider for TavilySearchProvider {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>, SearchError> {
        debug!(
            "Tavily search '{}' (max {}, days {:?}, {} domains)",
            query,
            options.max_results,
            options.recency_days,
            options.include_domains.len()
        );

        let response = self
            .client
            .post(&self.base_url)
            .json(&request_body(&self.api_key, query, options))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status(self.name(), status, &body));
        }

        parse_response(&body)
    }
}
