//! Entities to be sensed and their enriched form.

use crate::state::ConsensusState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Keys owned by [`EnrichedEntity`]; never carried as free attributes.
const RESERVED_KEYS: [&str; 3] = ["current_state", "realtime_state", "observed_at"];

/// An economic or financial entity whose current state is wanted.
///
/// Accepts several input shapes for queries: `declared_queries`,
/// `sensing_config.auto_queries` and a single `search_query`. They are merged
/// in that order, trimmed and deduplicated. Unrecognized fields are kept in
/// `attributes` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EntityInput")]
pub struct Entity {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub declared_queries: Vec<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Entity {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        entity_type: impl Into<String>,
        queries: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            entity_type: entity_type.into(),
            declared_queries: merge_queries(queries.into_iter().map(Into::into)),
            attributes: Map::new(),
        }
    }

    pub fn has_queries(&self) -> bool {
        !self.declared_queries.is_empty()
    }
}

#[derive(Deserialize)]
struct EntityInput {
    #[serde(default, deserialize_with = "string_or_number")]
    id: String,
    #[serde(default, alias = "node_label", alias = "name")]
    label: String,
    #[serde(rename = "type", default)]
    entity_type: String,
    #[serde(default)]
    declared_queries: Vec<String>,
    #[serde(default)]
    sensing_config: Option<SensingConfigInput>,
    #[serde(default)]
    search_query: Option<String>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

#[derive(Deserialize, Default)]
struct SensingConfigInput {
    #[serde(default)]
    auto_queries: Vec<String>,
}

impl From<EntityInput> for Entity {
    fn from(input: EntityInput) -> Self {
        let auto = input.sensing_config.unwrap_or_default().auto_queries;
        let queries = input
            .declared_queries
            .into_iter()
            .chain(auto)
            .chain(input.search_query);

        let mut attributes = input.attributes;
        for key in RESERVED_KEYS {
            attributes.remove(key);
        }

        Self {
            id: input.id,
            label: input.label.trim().to_string(),
            entity_type: input.entity_type.trim().to_string(),
            declared_queries: merge_queries(queries),
            attributes,
        }
    }
}

fn merge_queries(queries: impl Iterator<Item = String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for query in queries {
        let query = query.trim();
        if !query.is_empty() && !merged.iter().any(|q| q == query) {
            merged.push(query.to_string());
        }
    }
    merged
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for id, got {}",
            other
        ))),
    }
}

/// An entity with its observed state attached.
///
/// `current_state == None` means sensing was not attempted (the entity
/// declared no queries), which is distinct from an attempted `unknown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedEntity {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, alias = "realtime_state", skip_serializing_if = "Option::is_none")]
    pub current_state: Option<ConsensusState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
}

impl EnrichedEntity {
    pub fn not_attempted(entity: Entity) -> Self {
        Self {
            entity,
            current_state: None,
            observed_at: None,
        }
    }

    pub fn observed(entity: Entity, state: ConsensusState, observed_at: DateTime<Utc>) -> Self {
        Self {
            entity,
            current_state: Some(state),
            observed_at: Some(observed_at),
        }
    }

    pub fn was_attempted(&self) -> bool {
        self.current_state.is_some()
    }

    pub fn is_success(&self) -> bool {
        self.current_state.as_ref().is_some_and(ConsensusState::is_success)
    }
}

/// Outcome counts for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded_count: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[EnrichedEntity]) -> Self {
        Self {
            total: results.len(),
            succeeded_count: results.iter().filter(|e| e.is_success()).count(),
        }
    }

    pub fn failed_count(&self) -> usize {
        self.total - self.succeeded_count
    }
}
