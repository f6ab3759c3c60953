//! Oracle response parsing.
//!
//! Models wrap JSON in prose or markdown fences, emit numbers where strings
//! are expected and invent trend labels. The parser tolerates the first two,
//! coerces the third to `stable`, and rejects anything missing the required
//! fields.

use super::OracleExtraction;
use crate::consensus::CandidateValue;
use crate::core::error::SensingError;
use crate::state::{Confidence, SourceKind, SourceRef, Trend};
use serde_json::{Map, Value};
use thiserror::Error;

/// Fields every extraction must carry.
const REQUIRED_FIELDS: [&str; 4] = ["value", "trend", "narrative_context", "sources"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no JSON object found in response")]
    NoJson,

    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("field '{field}' has the wrong type, expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

impl From<ParseError> for SensingError {
    fn from(err: ParseError) -> Self {
        SensingError::MalformedOracleOutput(err.to_string())
    }
}

/// Parse a raw oracle response into an [`OracleExtraction`].
///
/// # Examples
///
/// ```
/// use sensing_domain::oracle::parse_oracle_response;
/// use sensing_domain::Trend;
///
/// let raw = r#"Here you go: {"value": "5.25%", "trend": "up",
///  "narrative_context": "Fed holds", "confidence": "whitelist_direct",
///  "sources": []} Let me know if you need more."#;
/// let extraction = parse_oracle_response(raw).unwrap();
/// assert_eq!(extraction.value, "5.25%");
/// assert_eq!(extraction.trend, Trend::Rising);
/// ```
pub fn parse_oracle_response(response: &str) -> Result<OracleExtraction, ParseError> {
    let object = extract_json_object(response)?;

    for field in REQUIRED_FIELDS {
        if !object.contains_key(field) {
            return Err(ParseError::MissingField(field));
        }
    }

    let value = scalar_string(&object["value"]).ok_or(ParseError::WrongType {
        field: "value",
        expected: "string",
    })?;
    let trend = object["trend"]
        .as_str()
        .map(Trend::parse_lenient)
        .unwrap_or_default();
    let narrative_context =
        scalar_string(&object["narrative_context"]).ok_or(ParseError::WrongType {
            field: "narrative_context",
            expected: "string",
        })?;
    let claimed_confidence = object
        .get("confidence")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Confidence>().ok());

    // Uncapped; callers cap after grounding against the evidence.
    let sources = parse_sources(&object["sources"], "sources")?;

    let candidates = match object.get("candidates") {
        Some(Value::Array(items)) => items.iter().filter_map(parse_candidate).collect(),
        _ => Vec::new(),
    };

    Ok(OracleExtraction {
        value: value.trim().to_string(),
        trend,
        narrative_context: narrative_context.trim().to_string(),
        claimed_confidence,
        sources,
        candidates,
    })
}

/// Locate and decode the JSON object in a response.
fn extract_json_object(response: &str) -> Result<Map<String, Value>, ParseError> {
    let trimmed = strip_code_fence(response.trim());

    let candidate = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => value,
        Err(_) => {
            let Some(start) = trimmed.find('{') else {
                return Err(ParseError::NoJson);
            };
            let Some(end) = trimmed.rfind('}') else {
                return Err(ParseError::NoJson);
            };
            if end < start {
                return Err(ParseError::NoJson);
            }
            serde_json::from_str::<Value>(&trimmed[start..=end])
                .map_err(|e| ParseError::InvalidJson(e.to_string()))?
        }
    };

    match candidate {
        Value::Object(map) => Ok(map),
        _ => Err(ParseError::NoJson),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(open) = text.find("```") else {
        return text;
    };
    let after_open = &text[open + 3..];
    // Skip the info string (e.g. `json`) up to the end of the line.
    let body_start = after_open.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_open[body_start..];
    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

fn parse_sources(value: &Value, field: &'static str) -> Result<Vec<SourceRef>, ParseError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        _ => {
            return Err(ParseError::WrongType {
                field,
                expected: "array",
            });
        }
    };

    Ok(items.iter().filter_map(parse_source).collect())
}

fn parse_source(item: &Value) -> Option<SourceRef> {
    match item {
        Value::String(url) if !url.trim().is_empty() => {
            Some(SourceRef::new("", url.trim(), SourceKind::NewsSearch))
        }
        Value::Object(map) => {
            let text = |key: &str| {
                map.get(key)
                    .and_then(Value::as_str)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default()
            };
            let url = text("url");
            let declared_domain = text("domain");
            if url.is_empty() && declared_domain.is_empty() {
                return None;
            }
            let mut source = SourceRef::new(text("title"), url, SourceKind::NewsSearch);
            if source.domain.is_empty() {
                source.domain = declared_domain;
            }
            Some(source)
        }
        _ => None,
    }
}

fn parse_candidate(item: &Value) -> Option<CandidateValue> {
    let map = item.as_object()?;
    let value = scalar_string(map.get("value")?)?;
    let sources = map
        .get("sources")
        .map(|s| parse_sources(s, "candidates.sources"))
        .transpose()
        .ok()
        .flatten()
        .unwrap_or_default();
    Some(CandidateValue::new(value.trim(), sources))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(value: &str, trend: &str, sources: &str) -> String {
        format!(
            r#"{{"value": {value}, "trend": "{trend}", "narrative_context": "ctx",
                "confidence": "cross_validated", "sources": {sources}}}"#
        )
    }

    #[test]
    fn test_parse_plain_json() {
        let raw = full(
            r#""5.25%""#,
            "stable",
            r#"[{"title": "Fed", "url": "https://www.reuters.com/a", "domain": "reuters.com"}]"#,
        );
        let parsed = parse_oracle_response(&raw).unwrap();
        assert_eq!(parsed.value, "5.25%");
        assert_eq!(parsed.trend, Trend::Stable);
        assert_eq!(parsed.claimed_confidence, Some(Confidence::CrossValidated));
        assert_eq!(parsed.sources.len(), 1);
        assert_eq!(parsed.sources[0].domain, "reuters.com");
    }

    #[test]
    fn test_parse_json_in_prose() {
        let raw = format!(
            "After reviewing the evidence, my answer is {} Hope that helps.",
            full(r#""unknown""#, "falling", "[]")
        );
        let parsed = parse_oracle_response(&raw).unwrap();
        assert!(parsed.is_unknown());
        assert_eq!(parsed.trend, Trend::Falling);
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = format!(
            "Result:\n```json\n{}\n```\n",
            full(r#""1850 USD""#, "rising", "[]")
        );
        let parsed = parse_oracle_response(&raw).unwrap();
        assert_eq!(parsed.value, "1850 USD");
        assert_eq!(parsed.trend, Trend::Rising);
    }

    #[test]
    fn test_numeric_value_accepted() {
        let raw = full("2025.5", "rising", "[]");
        let parsed = parse_oracle_response(&raw).unwrap();
        assert_eq!(parsed.value, "2025.5");
    }

    #[test]
    fn test_invalid_trend_coerced_to_stable() {
        let raw = full(r#""7.2%""#, "sideways", "[]");
        let parsed = parse_oracle_response(&raw).unwrap();
        assert_eq!(parsed.trend, Trend::Stable);
    }

    #[test]
    fn test_missing_field_rejected() {
        let raw = r#"{"value": "5.25%", "trend": "stable", "sources": []}"#;
        assert_eq!(
            parse_oracle_response(raw),
            Err(ParseError::MissingField("narrative_context"))
        );
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(
            parse_oracle_response("I cannot help with that."),
            Err(ParseError::NoJson)
        );
        assert!(matches!(
            parse_oracle_response("{ value: 5 }"),
            Err(ParseError::InvalidJson(_))
        ));
        assert_eq!(
            parse_oracle_response(&full(r#""x""#, "stable", r#""a.com""#)),
            Err(ParseError::WrongType {
                field: "sources",
                expected: "array"
            })
        );
    }

    #[test]
    fn test_structured_narrative_rejected() {
        let raw = r#"{"value": "5.25%", "trend": "stable",
            "narrative_context": {"summary": "Fed holds"}, "sources": []}"#;
        assert_eq!(
            parse_oracle_response(raw),
            Err(ParseError::WrongType {
                field: "narrative_context",
                expected: "string"
            })
        );

        let null_narrative = r#"{"value": "5.25%", "trend": "stable",
            "narrative_context": null, "sources": []}"#;
        assert_eq!(parse_oracle_response(null_narrative).unwrap().narrative_context, "");
    }

    #[test]
    fn test_sources_are_not_capped() {
        let sources = r#"["https://a.com/1", "https://b.com/1", "https://c.com/1", "https://d.com/1"]"#;
        let raw = full(r#""5%""#, "stable", sources);
        assert_eq!(parse_oracle_response(&raw).unwrap().sources.len(), 4);
    }

    #[test]
    fn test_genuine_citation_after_invented_ones_survives_grounding() {
        use crate::consensus::ground_sources;
        use crate::evidence::{Attempt, EvidenceSet, SearchResult};

        let sources = r#"["https://invented.com/1", "https://invented.com/2",
            "https://invented.com/3", "https://www.reuters.com/fed"]"#;
        let raw = full(r#""5.25%""#, "stable", sources);
        let parsed = parse_oracle_response(&raw).unwrap();

        let evidence = EvidenceSet::new(
            Attempt::Whitelist,
            vec![
                SearchResult::new("Bloomberg", "https://bloomberg.com/a", "rates"),
                SearchResult::new("Reuters", "https://www.reuters.com/fed", "Fed holds"),
            ],
        );
        let (grounded, discarded) = ground_sources(&parsed.sources, &evidence);
        assert_eq!(grounded.len(), 1);
        assert_eq!(grounded[0].domain, "reuters.com");
        assert_eq!(discarded, 3);
    }

    #[test]
    fn test_candidates_parsed() {
        let raw = r#"{"value": "5.25%", "trend": "stable", "narrative_context": "",
            "sources": [],
            "candidates": [
                {"value": "5.50%", "sources": [{"url": "https://a.com/1"}]},
                {"sources": []},
                "junk"
            ]}"#;
        let parsed = parse_oracle_response(raw).unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        assert_eq!(parsed.candidates[0].value, "5.50%");
        assert_eq!(parsed.candidates[0].sources[0].domain, "a.com");
    }

    #[test]
    fn test_parse_error_maps_to_malformed_output() {
        let err: SensingError = ParseError::NoJson.into();
        assert!(err.is_ambiguous());
        assert!(matches!(err, SensingError::MalformedOracleOutput(_)));
    }
}
