//! Entity file reader
//!
//! Accepts a bare JSON array of entities or a graph document carrying them
//! under `nodes` or `entities`. Other top-level keys are ignored.

use sensing_domain::Entity;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum EntityDocument {
    List(Vec<Entity>),
    Nodes { nodes: Vec<Entity> },
    Entities { entities: Vec<Entity> },
}

/// Parse an entity document.
pub fn parse_entities(text: &str) -> Result<Vec<Entity>, serde_json::Error> {
    // Untagged errors are opaque; retry as a plain list for a precise message.
    match serde_json::from_str::<EntityDocument>(text) {
        Ok(EntityDocument::List(entities))
        | Ok(EntityDocument::Nodes { nodes: entities })
        | Ok(EntityDocument::Entities { entities }) => Ok(entities),
        Err(e) => match serde_json::from_str::<serde_json::Value>(text) {
            Ok(serde_json::Value::Array(_)) => serde_json::from_str::<Vec<Entity>>(text),
            _ => Err(e),
        },
    }
}
