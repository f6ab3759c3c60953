//! Progress reporting for batch enrichment
//!
//! Both reporters draw on stderr so JSON output on stdout stays clean.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use sensing_application::EnrichmentProgress;
use sensing_domain::{BatchSummary, EnrichedEntity, Entity};
use std::sync::Mutex;

/// Reports progress with an indicatif progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn batch_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Short completion marker for one entity
fn entity_status(entity: &EnrichedEntity) -> String {
    let label = &entity.entity.label;
    match &entity.current_state {
        None => format!("{} {} (skipped)", "-".dimmed(), label),
        Some(state) => {
            let strategy = state
                .strategy_used
                .map(|s| s.to_string())
                .unwrap_or_else(|| "none".to_string());
            if entity.is_success() {
                format!("{} {} via {} [{}]", "v".green(), label, strategy, state.confidence)
            } else {
                format!("{} {} [{}]", "x".red(), label, state.confidence)
            }
        }
    }
}

impl EnrichmentProgress for ProgressReporter {
    fn on_batch_start(&self, total: usize) {
        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
        bar.set_style(Self::batch_style());
        bar.set_prefix("Sensing");
        bar.set_message("Starting...");
        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_entity_start(&self, entity: &Entity) {
        self.with_bar(|bar| bar.set_message(entity.label.clone()));
    }

    fn on_entity_complete(&self, entity: &EnrichedEntity) {
        let status = entity_status(entity);
        self.with_bar(|bar| {
            bar.set_message(status);
            bar.inc(1);
        });
    }

    fn on_batch_complete(&self, summary: &BatchSummary) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(bar) = guard.take()
        {
            bar.finish_with_message(format!(
                "{} {}/{} succeeded",
                "complete!".green(),
                summary.succeeded_count,
                summary.total
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl EnrichmentProgress for SimpleProgress {
    fn on_batch_start(&self, total: usize) {
        eprintln!("{} {} ({} entities)", "->".cyan(), "Sensing".bold(), total);
    }

    fn on_entity_complete(&self, entity: &EnrichedEntity) {
        eprintln!("  {}", entity_status(entity));
    }

    fn on_batch_complete(&self, summary: &BatchSummary) {
        eprintln!(
            "{} {}/{} succeeded",
            "->".cyan(),
            summary.succeeded_count,
            summary.total
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sensing_domain::{Confidence, ConsensusState, Strategy};

    #[test]
    fn test_entity_status() {
        colored::control::set_override(false);
        let entity = Entity::new("n1", "gold", "cause", ["gold price"]);

        let mut state =
            ConsensusState::unknown(Confidence::ApiDirect, "n").with_strategy(Strategy::DirectQuote);
        state.value = "2025.00 USD".into();
        let ok = EnrichedEntity::observed(entity.clone(), state, Utc::now());
        assert_eq!(entity_status(&ok), "v gold via direct_quote [api_direct]");

        let failed = EnrichedEntity::observed(
            entity.clone(),
            ConsensusState::unknown(Confidence::Unknown, "n"),
            Utc::now(),
        );
        assert_eq!(entity_status(&failed), "x gold [unknown]");

        let skipped = EnrichedEntity::not_attempted(entity);
        assert_eq!(entity_status(&skipped), "- gold (skipped)");
    }

    #[test]
    fn test_reporter_lifecycle_without_terminal() {
        let reporter = ProgressReporter::new();
        reporter.on_entity_complete(&EnrichedEntity::not_attempted(Entity::new(
            "n1",
            "gold",
            "cause",
            Vec::<String>::new(),
        )));
        reporter.on_batch_start(1);
        reporter.on_batch_complete(&BatchSummary {
            total: 1,
            succeeded_count: 0,
        });
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}
