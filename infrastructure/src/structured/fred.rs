//! FRED (St. Louis Fed) structured data adapter
//!
//! Labels resolve to series ids through a [`LabelIndex`]; the series metadata
//! and its latest observations are fetched concurrently. FRED reports missing
//! observations as `"."`, which are skipped.

use crate::http::body_excerpt;
use async_trait::async_trait;
use chrono::NaiveDate;
use sensing_application::{StructuredError, StructuredProvider};
use sensing_domain::{LabelIndex, SourceKind, SourceRef, StructuredObservation};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

const FRED_API_URL: &str = "https://api.stlouisfed.org/fred";
const FRED_SERIES_PAGE: &str = "https://fred.stlouisfed.org/series";
const OBSERVATION_WINDOW: &str = "5";

#[derive(Debug, Deserialize)]
struct SeriesEnvelope {
    #[serde(default)]
    seriess: Vec<SeriesInfo>,
}

#[derive(Debug, Clone, Deserialize)]
struct SeriesInfo {
    #[serde(default)]
    title: String,
    #[serde(default)]
    units_short: Option<String>,
    #[serde(default)]
    units: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObservationEnvelope {
    #[serde(default)]
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

/// Numeric observations, newest first.
fn numeric_observations(raw: Vec<RawObservation>) -> Vec<(Option<NaiveDate>, f64)> {
    raw.into_iter()
        .filter_map(|obs| {
            let value = obs.value.trim().parse::<f64>().ok()?;
            let date = NaiveDate::parse_from_str(obs.date.trim(), "%Y-%m-%d").ok();
            Some((date, value))
        })
        .collect()
}

fn build_observation(
    series_id: &str,
    info: SeriesInfo,
    observations: Vec<(Option<NaiveDate>, f64)>,
) -> Option<StructuredObservation> {
    let mut iter = observations.into_iter();
    let (observed_on, value) = iter.next()?;
    let previous_value = iter.next().map(|(_, v)| v);

    let title = if info.title.trim().is_empty() {
        series_id.to_string()
    } else {
        info.title.trim().to_string()
    };
    let units = info.units_short.or(info.units).unwrap_or_default();

    Some(StructuredObservation {
        provider: "fred".to_string(),
        series_id: series_id.to_string(),
        source: SourceRef::new(
            format!("FRED - {}", title),
            format!("{}/{}", FRED_SERIES_PAGE, series_id),
            SourceKind::StructuredApi,
        ),
        title,
        value,
        units,
        previous_value,
        observed_on,
    })
}

pub struct FredStructuredProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    series: Arc<LabelIndex<String>>,
    base_url: String,
}

impl FredStructuredProvider {
    pub fn new(
        client: reqwest::Client,
        api_key: Option<String>,
        series: Arc<LabelIndex<String>>,
    ) -> Self {
        Self {
            client,
            api_key,
            series,
            base_url: FRED_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn series_for(&self, label: &str) -> Option<&str> {
        self.series.lookup(label).map(|hit| hit.value.as_str())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, StructuredError> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(params)
            .send()
            .await
            .map_err(|e| StructuredError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StructuredError::RequestFailed(e.to_string()))?;
        if !status.is_success() {
            return Err(StructuredError::RequestFailed(format!(
                "fred {} returned {}: {}",
                endpoint,
                status,
                body_excerpt(&body)
            )));
        }

        serde_json::from_str(&body).map_err(|e| StructuredError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl StructuredProvider for FredStructuredProvider {
    fn name(&self) -> &str {
        "fred"
    }

    async fn fetch(&self, label: &str) -> Result<Option<StructuredObservation>, StructuredError> {
        let Some(series_id) = self.series_for(label) else {
            debug!("No FRED series for '{}'", label);
            return Ok(None);
        };
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(StructuredError::NotConfigured(
                "FRED API key missing".to_string(),
            ));
        };

        debug!("FRED fetch '{}' -> {}", label, series_id);
        let series_params = [
            ("series_id", series_id),
            ("api_key", api_key),
            ("file_type", "json"),
        ];
        let observation_params = [
            ("series_id", series_id),
            ("api_key", api_key),
            ("file_type", "json"),
            ("sort_order", "desc"),
            ("limit", OBSERVATION_WINDOW),
        ];

        let (series, observations) = tokio::try_join!(
            self.get_json::<SeriesEnvelope>("series", &series_params),
            self.get_json::<ObservationEnvelope>("series/observations", &observation_params),
        )?;

        let info = series.seriess.into_iter().next().unwrap_or(SeriesInfo {
            title: String::new(),
            units_short: None,
            units: None,
        });
        Ok(build_observation(
            series_id,
            info,
            numeric_observations(observations.observations),
        ))
    }
}
