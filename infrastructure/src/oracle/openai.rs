//! OpenAI-compatible reasoning oracle
//!
//! Sends the extraction prompt to `{base_url}/chat/completions` with JSON
//! output mode and parses the reply with the domain parser. Direct mode runs
//! at temperature 0.1; cross-validation runs at 0.0 for maximum determinism.
//! Any endpoint speaking the same protocol works (DeepSeek, local gateways).

use crate::http::body_excerpt;
use async_trait::async_trait;
use sensing_application::{OracleError, ReasoningOracle};
use sensing_domain::{
    EvidenceSet, ExtractionMode, OracleExtraction, PromptTemplate, parse_oracle_response,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn temperature(mode: ExtractionMode) -> f32 {
    match mode {
        ExtractionMode::Direct => 0.1,
        ExtractionMode::CrossValidate => 0.0,
    }
}

fn response_content(body: &str) -> Result<String, OracleError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| OracleError::RequestFailed(format!("unreadable completion: {}", e)))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| OracleError::RequestFailed("completion has no content".to_string()))
}

pub struct OpenAiReasoningOracle {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiReasoningOracle {
    pub fn new(
        client: reqwest::Client,
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ReasoningOracle for OpenAiReasoningOracle {
    async fn extract(
        &self,
        label: &str,
        evidence: &EvidenceSet,
        mode: ExtractionMode,
    ) -> Result<OracleExtraction, OracleError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(OracleError::NotConfigured(
                "no API key for the reasoning oracle".to_string(),
            ));
        };

        let user_prompt = PromptTemplate::extraction_prompt(label, evidence, mode);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: PromptTemplate::extraction_system(mode),
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            temperature: temperature(mode),
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        debug!(
            model = %self.model,
            "Oracle {} extraction for '{}' over {} evidence items",
            mode,
            label,
            evidence.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OracleError::Timeout
                } else {
                    OracleError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OracleError::RequestFailed(e.to_string()))?;
        if !status.is_success() {
            return Err(OracleError::RequestFailed(format!(
                "oracle returned {}: {}",
                status,
                body_excerpt(&body)
            )));
        }

        let content = response_content(&body)?;
        Ok(parse_oracle_response(&content)?)
    }
}
