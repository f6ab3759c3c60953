//! Progress notification port
//!
//! Defines the interface for reporting progress during batch enrichment.

use sensing_domain::{BatchSummary, EnrichedEntity, Entity};

/// Callback for progress updates during enrichment
///
/// Implementations live in the presentation layer. Callbacks fire from
/// concurrent tasks, so implementations must be thread-safe.
pub trait EnrichmentProgress: Send + Sync {
    /// Called once before any entity starts
    fn on_batch_start(&self, total: usize);

    /// Called when an entity's pipeline starts
    fn on_entity_start(&self, _entity: &Entity) {}

    /// Called when an entity's pipeline finishes, successfully or not
    fn on_entity_complete(&self, entity: &EnrichedEntity);

    /// Called once after every entity has finished
    fn on_batch_complete(&self, summary: &BatchSummary);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl EnrichmentProgress for NoProgress {
    fn on_batch_start(&self, _total: usize) {}
    fn on_entity_complete(&self, _entity: &EnrichedEntity) {}
    fn on_batch_complete(&self, _summary: &BatchSummary) {}
}
