//! Serper (Google) search adapter
//!
//! `POST https://google.serper.dev/search` with the key in `X-API-KEY`.
//! Recency maps onto Google's `tbs=qdr:*` buckets, rounded up. Serper has no
//! domain allow-list, so `include_domains` is left to the caller's filter.

use super::tavily::{map_status, map_transport_error};
use async_trait::async_trait;
use sensing_application::{SearchError, SearchOptions, SearchProvider};
use sensing_domain::SearchResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

const SERPER_API_URL: &str = "https://google.serper.dev/search";

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    tbs: Option<&'static str>,
}

#[derive(Debug, Default, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperHit>,
}

#[derive(Debug, Deserialize)]
struct SerperHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

pub struct SerperSearchProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SerperSearchProvider {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: SERPER_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Smallest Google time bucket covering `days`.
fn time_bucket(days: u32) -> &'static str {
    match days {
        0..=1 => "qdr:d",
        2..=7 => "qdr:w",
        8..=31 => "qdr:m",
        _ => "qdr:y",
    }
}

fn parse_response(body: &str) -> Result<Vec<SearchResult>, SearchError> {
    let response: SerperResponse =
        serde_json::from_str(body).map_err(|e| SearchError::InvalidResponse(e.to_string()))?;
    Ok(response
        .organic
        .into_iter()
        .filter(|hit| !hit.link.trim().is_empty())
        .map(|hit| SearchResult::new(hit.title, hit.link.trim(), hit.snippet))
        .collect())
}

#[async_trait]
impl SearchProvider for SerperSearchProvider {
    fn name(&self) -> &str {
        "serper"
    }

    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let request = SerperRequest {
            q: query,
            num: options.max_results,
            tbs: options.recency_days.map(time_bucket),
        };
        debug!("Serper search '{}' (num {}, tbs {:?})", query, request.num, request.tbs);

        let response = self
            .client
            .post(&self.base_url)
            .header("X-API-KEY", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status(self.name(), status, &body));
        }

        let mut results = parse_response(&body)?;
        results.truncate(options.max_results);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_time_bucket_rounds_up() {
        assert_eq!(time_bucket(1), "qdr:d");
        assert_eq!(time_bucket(7), "qdr:w");
        assert_eq!(time_bucket(30), "qdr:m");
        assert_eq!(time_bucket(90), "qdr:y");
    }

    #[test]
    fn test_parse_organic_results() {
        let body = json!({
            "searchParameters": {"q": "gold price"},
            "organic": [
                {"title": "Gold climbs", "link": "https://www.kitco.com/news/1", "snippet": "2025 USD", "position": 1},
                {"title": "Broken", "snippet": "no link"}
            ],
            "peopleAlsoAsk": []
        })
        .to_string();

        let results = parse_response(&body).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://www.kitco.com/news/1");
        assert_eq!(results[0].domain, "kitco.com");
    }

    #[test]
    fn test_request_serialization() {
        let request = SerperRequest {
            q: "q",
            num: 10,
            tbs: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"q": "q", "num": 10}));
    }
}
