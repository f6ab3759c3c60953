//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod enrich_nodes;
pub mod gather_evidence;
pub mod lookup_quote;
pub mod lookup_structured;
pub mod validate_consensus;

#[cfg(test)]
pub(crate) mod testing;
