//! Yahoo Finance quote adapter
//!
//! Reads the chart endpoint's `meta` block: last price, previous close,
//! currency and display name. An unknown symbol is `Ok(None)`, not an error.

use crate::http::body_excerpt;
use async_trait::async_trait;
use reqwest::StatusCode;
use sensing_application::{QuoteError, QuoteProvider};
use sensing_domain::{DirectQuote, SourceKind, SourceRef};
use serde::Deserialize;
use tracing::debug;

const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const YAHOO_QUOTE_PAGE: &str = "https://finance.yahoo.com/quote";

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    chart_previous_close: Option<f64>,
    #[serde(default)]
    previous_close: Option<f64>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    long_name: Option<String>,
}

pub struct YahooQuoteProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooQuoteProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: YAHOO_CHART_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

fn parse_chart(symbol: &str, body: &str) -> Result<Option<DirectQuote>, QuoteError> {
    let envelope: ChartEnvelope =
        serde_json::from_str(body).map_err(|e| QuoteError::InvalidResponse(e.to_string()))?;

    let Some(meta) = envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .map(|r| r.meta)
    else {
        return Ok(None);
    };

    let Some(price) = meta.regular_market_price.filter(|p| p.is_finite()) else {
        return Ok(None);
    };

    let symbol = meta.symbol.unwrap_or_else(|| symbol.to_string());
    let asset_name = meta
        .short_name
        .or(meta.long_name)
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| symbol.clone());
    let previous_close = meta
        .chart_previous_close
        .or(meta.previous_close)
        .filter(|p| p.is_finite() && *p != 0.0);

    let source = SourceRef::new(
        format!("Yahoo Finance - {}", asset_name),
        format!("{}/{}", YAHOO_QUOTE_PAGE, symbol),
        SourceKind::DirectApi,
    );

    Ok(Some(DirectQuote {
        symbol,
        asset_name,
        price,
        currency: meta.currency.unwrap_or_else(|| "USD".to_string()),
        previous_close,
        source,
    }))
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn quote(&self, symbol: &str) -> Result<Option<DirectQuote>, QuoteError> {
        let url = format!("{}/{}", self.base_url, symbol);
        debug!("Yahoo chart request for {}", symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("interval", "1d"), ("range", "5d")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    QuoteError::Timeout
                } else {
                    QuoteError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QuoteError::RequestFailed(e.to_string()))?;

        match status {
            StatusCode::TOO_MANY_REQUESTS => Err(QuoteError::RateLimited),
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => parse_chart(symbol, &body),
            s => Err(QuoteError::RequestFailed(format!(
                "yahoo returned {}: {}",
                s,
                body_excerpt(&body)
            ))),
        }
    }
}
