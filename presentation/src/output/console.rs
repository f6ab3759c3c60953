//! Console output formatter for enrichment results

use colored::{ColoredString, Colorize};
use sensing_domain::{BatchSummary, Confidence, EnrichedEntity, OutputFormat, Trend};
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    entities: &'a [EnrichedEntity],
    summary: &'a BatchSummary,
}

/// Formats enrichment results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format(
        format: OutputFormat,
        results: &[EnrichedEntity],
        summary: &BatchSummary,
    ) -> String {
        match format {
            OutputFormat::Full => Self::format_full(results, summary),
            OutputFormat::Summary => Self::format_summary(results, summary),
            OutputFormat::Json => Self::format_json(results, summary),
        }
    }

    /// Every entity with value, trend, narrative and sources
    pub fn format_full(results: &[EnrichedEntity], summary: &BatchSummary) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Node Sensing Results"));
        output.push('\n');

        for enriched in results {
            let entity = &enriched.entity;
            output.push_str(&format!(
                "\n{}\n",
                format!("── {} ({}, {}) ──", entity.label, entity.id, entity.entity_type)
                    .yellow()
                    .bold()
            ));

            let Some(state) = &enriched.current_state else {
                output.push_str(&format!("  {}\n", "not attempted (no queries)".dimmed()));
                continue;
            };

            output.push_str(&format!("  {} {}\n", "Value:     ".cyan(), state.value.bold()));
            output.push_str(&format!(
                "  {} {}\n",
                "Trend:     ".cyan(),
                Self::trend_label(state.trend)
            ));
            if let Some(change) = &state.change_percent {
                output.push_str(&format!("  {} {}\n", "Change:    ".cyan(), change));
            }
            output.push_str(&format!(
                "  {} {}\n",
                "Confidence:".cyan(),
                Self::confidence_label(state.confidence)
            ));
            if let Some(strategy) = state.strategy_used {
                output.push_str(&format!("  {} {}\n", "Strategy:  ".cyan(), strategy));
            }
            output.push_str(&format!(
                "  {} {}\n",
                "Narrative: ".cyan(),
                state.narrative_context
            ));

            if !state.sources.is_empty() {
                output.push_str(&format!("  {}\n", "Sources:".cyan()));
                for (i, source) in state.sources.iter().enumerate() {
                    output.push_str(&format!(
                        "    [{}] {} {}\n",
                        i + 1,
                        source.title,
                        format!("<{}>", source.url).dimmed()
                    ));
                }
            }
            if let Some(observed_at) = enriched.observed_at {
                output.push_str(&format!(
                    "  {}\n",
                    format!("observed {}", observed_at.format("%Y-%m-%d %H:%M:%S UTC")).dimmed()
                ));
            }
        }

        output.push_str(&Self::section_header("Summary"));
        output.push_str(&Self::summary_line(summary));
        output.push('\n');
        output.push_str(&Self::footer());
        output
    }

    /// One line per entity plus the batch summary
    pub fn format_summary(results: &[EnrichedEntity], summary: &BatchSummary) -> String {
        let mut output = String::new();

        for enriched in results {
            let label = &enriched.entity.label;
            let line = match &enriched.current_state {
                None => format!("{} {}  {}", "-".dimmed(), label, "(no queries)".dimmed()),
                Some(state) if enriched.is_success() => format!(
                    "{} {}  {} {} [{}]",
                    "v".green(),
                    label,
                    state.value.bold(),
                    Self::trend_arrow(state.trend),
                    Self::confidence_label(state.confidence)
                ),
                Some(state) => format!(
                    "{} {}  {} [{}]",
                    "x".red(),
                    label,
                    state.value,
                    Self::confidence_label(state.confidence)
                ),
            };
            output.push_str(&line);
            output.push('\n');
        }

        output.push('\n');
        output.push_str(&Self::summary_line(summary));
        output.push('\n');
        output
    }

    /// Format as JSON
    pub fn format_json(results: &[EnrichedEntity], summary: &BatchSummary) -> String {
        let report = JsonReport {
            entities: results,
            summary,
        };
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }

    fn summary_line(summary: &BatchSummary) -> String {
        format!(
            "{} {}/{} succeeded, {} unknown or not attempted",
            "Summary:".cyan().bold(),
            summary.succeeded_count,
            summary.total,
            summary.failed_count()
        )
    }

    fn confidence_label(confidence: Confidence) -> ColoredString {
        match confidence {
            Confidence::ApiDirect => confidence.as_str().green().bold(),
            Confidence::WhitelistDirect => confidence.as_str().green(),
            Confidence::CrossValidated => confidence.as_str().yellow(),
            Confidence::Unknown => confidence.as_str().red(),
        }
    }

    fn trend_arrow(trend: Trend) -> &'static str {
        match trend {
            Trend::Rising => "↑",
            Trend::Falling => "↓",
            Trend::Stable => "→",
        }
    }

    fn trend_label(trend: Trend) -> String {
        format!("{} {}", Self::trend_arrow(trend), trend)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sensing_domain::{ConsensusState, Entity, SourceKind, SourceRef};

    fn results() -> Vec<EnrichedEntity> {
        let gold = Entity::new("n1", "黄金价格", "cause", ["gold price"]);
        let mut state =
            ConsensusState::unknown(Confidence::ApiDirect, "Gold last traded at 2025.00 USD");
        state.value = "2025.00 USD".into();
        state.trend = Trend::Rising;
        state.sources = vec![SourceRef::new(
            "Yahoo Finance - Gold",
            "https://finance.yahoo.com/quote/GC=F",
            SourceKind::DirectApi,
        )];

        let rate = Entity::new("n2", "美联储利率", "macro_indicator", ["fed rate"]);
        let unknown =
            ConsensusState::unknown(Confidence::CrossValidated, "Could not cross-validate");

        vec![
            EnrichedEntity::observed(gold, state, Utc::now()),
            EnrichedEntity::observed(rate, unknown, Utc::now()),
            EnrichedEntity::not_attempted(Entity::new(
                "n3",
                "政策",
                "cause",
                Vec::<String>::new(),
            )),
        ]
    }

    #[test]
    fn test_format_json() {
        let results = results();
        let summary = BatchSummary::from_results(&results);
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&results, &summary)).unwrap();

        assert_eq!(json["summary"]["total"], 3);
        assert_eq!(json["summary"]["succeeded_count"], 1);
        assert_eq!(json["entities"][0]["current_state"]["confidence"], "api_direct");
        assert!(json["entities"][2].get("current_state").is_none());
    }

    #[test]
    fn test_format_summary_lines() {
        colored::control::set_override(false);
        let results = results();
        let summary = BatchSummary::from_results(&results);
        let text = ConsoleFormatter::format_summary(&results, &summary);

        assert!(text.contains("v 黄金价格  2025.00 USD ↑ [api_direct]"));
        assert!(text.contains("x 美联储利率  unknown [cross_validated]"));
        assert!(text.contains("- 政策  (no queries)"));
        assert!(text.contains("1/3 succeeded"));
    }

    #[test]
    fn test_format_full_lists_sources() {
        colored::control::set_override(false);
        let results = results();
        let summary = BatchSummary::from_results(&results);
        let text = ConsoleFormatter::format(OutputFormat::Full, &results, &summary);

        assert!(text.contains("[1] Yahoo Finance - Gold <https://finance.yahoo.com/quote/GC=F>"));
        assert!(text.contains("not attempted (no queries)"));
        assert!(text.contains("Node Sensing Results"));
    }
}
