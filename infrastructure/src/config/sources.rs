//! Sources file: whitelist, routing rules and label tables
//!
//! ```toml
//! [whitelist.central_banks]
//! domains = ["federalreserve.gov", "ecb.europa.eu"]
//!
//! [routing.macro_indicator]
//! primary_strategy = "structured_api"
//! fallback_strategy = "news_search"
//! preferred_providers = ["fred"]
//! tier1_domains = ["federalreserve.gov"]
//!
//! [symbols]
//! "黄金价格" = "GC=F"
//!
//! [fred_series]
//! "美联储利率" = "DFF"
//! ```
//!
//! Table order is significant: whitelist categories keep file order (the
//! default routing rule takes its tier 1 from the front), and label tables
//! are scanned in order for containment matches. File entries are merged
//! over the built-in label tables.

use super::error::ConfigError;
use sensing_domain::{
    DomainWhitelist, LabelIndex, RoutingRule, RoutingTable, Strategy, WhitelistCategory,
    default_fred_series, default_symbols,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct FileWhitelistCategory {
    #[serde(default)]
    domains: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FileRoutingRule {
    primary_strategy: String,
    #[serde(default)]
    fallback_strategy: Option<String>,
    #[serde(default, alias = "preferred_apis")]
    preferred_providers: Vec<String>,
    #[serde(default, alias = "tier_1_domains")]
    tier1_domains: Vec<String>,
    #[serde(default, alias = "tier_2_domains")]
    tier2_domains: Vec<String>,
}

/// Everything read from the sources file, ready to share across tasks
#[derive(Debug, Clone)]
pub struct SourcesConfig {
    pub whitelist: Arc<DomainWhitelist>,
    pub routing: Arc<RoutingTable>,
    pub symbols: Arc<LabelIndex<String>>,
    pub fred_series: Arc<LabelIndex<String>>,
}

impl SourcesConfig {
    /// Read and validate a sources file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::sources(path, e.to_string()))?;
        let config = Self::parse(&text).map_err(|message| ConfigError::sources(path, message))?;
        info!(
            "Loaded sources from {}: {} whitelisted domains, {} routing rules, {} symbols",
            path.display(),
            config.whitelist.len(),
            config.routing.len(),
            config.symbols.len()
        );
        Ok(config)
    }

    /// Parse sources text. Errors are human-readable messages.
    pub fn parse(text: &str) -> Result<Self, String> {
        let root: toml::Table = toml::from_str(text).map_err(|e| e.to_string())?;

        let whitelist = parse_whitelist(root.get("whitelist"))?;
        if whitelist.is_empty() {
            return Err(
                "whitelist is empty; at least one [whitelist.<category>] with domains is required"
                    .into(),
            );
        }

        let rules = parse_routing(root.get("routing"))?;
        for (entity_type, rule) in &rules {
            for domain in rule.tier1_domains.iter().chain(&rule.tier2_domains) {
                if !whitelist.contains(domain) {
                    warn!(
                        "routing.{}: domain '{}' is not in the whitelist",
                        entity_type, domain
                    );
                }
            }
        }
        let routing = RoutingTable::new(rules, &whitelist);

        let mut symbols = default_symbols();
        symbols.extend(parse_label_table(root.get("symbols"), "symbols")?);

        let mut fred_series = default_fred_series();
        fred_series.extend(parse_label_table(root.get("fred_series"), "fred_series")?);

        for key in root.keys() {
            if !matches!(key.as_str(), "whitelist" | "routing" | "symbols" | "fred_series") {
                warn!("Unknown section '{}' in sources file is ignored", key);
            }
        }

        Ok(Self {
            whitelist: Arc::new(whitelist),
            routing: Arc::new(routing),
            symbols: Arc::new(symbols),
            fred_series: Arc::new(fred_series),
        })
    }
}

fn section<'a>(
    value: Option<&'a toml::Value>,
    name: &str,
) -> Result<Option<&'a toml::Table>, String> {
    match value {
        None => Ok(None),
        Some(toml::Value::Table(table)) => Ok(Some(table)),
        Some(_) => Err(format!("[{}] must be a table", name)),
    }
}

fn parse_whitelist(value: Option<&toml::Value>) -> Result<DomainWhitelist, String> {
    let Some(table) = section(value, "whitelist")? else {
        return Ok(DomainWhitelist::default());
    };

    let mut categories = Vec::with_capacity(table.len());
    for (name, raw) in table {
        let category: FileWhitelistCategory = raw
            .clone()
            .try_into()
            .map_err(|e| format!("whitelist.{}: {}", name, e))?;
        if category.domains.is_empty() {
            warn!("whitelist.{} has no domains", name);
        }
        categories.push(WhitelistCategory::new(name.as_str(), category.domains));
    }
    Ok(DomainWhitelist::new(categories))
}

fn parse_strategy(entity_type: &str, field: &str, raw: &str) -> Result<Strategy, String> {
    raw.parse::<Strategy>()
        .map_err(|_| format!("routing.{}.{}: unknown strategy '{}'", entity_type, field, raw))
}

fn parse_routing(value: Option<&toml::Value>) -> Result<HashMap<String, RoutingRule>, String> {
    let Some(table) = section(value, "routing")? else {
        return Ok(HashMap::new());
    };

    let mut rules = HashMap::with_capacity(table.len());
    for (entity_type, raw) in table {
        let file_rule: FileRoutingRule = raw
            .clone()
            .try_into()
            .map_err(|e| format!("routing.{}: {}", entity_type, e))?;

        let primary_strategy =
            parse_strategy(entity_type, "primary_strategy", &file_rule.primary_strategy)?;
        let fallback_strategy = file_rule
            .fallback_strategy
            .as_deref()
            .map(|s| parse_strategy(entity_type, "fallback_strategy", s))
            .transpose()?;

        debug!(
            "Routing rule '{}': {} -> {:?}",
            entity_type, primary_strategy, fallback_strategy
        );
        rules.insert(
            entity_type.clone(),
            RoutingRule {
                primary_strategy,
                fallback_strategy,
                preferred_providers: file_rule.preferred_providers,
                tier1_domains: file_rule.tier1_domains,
                tier2_domains: file_rule.tier2_domains,
            },
        );
    }
    Ok(rules)
}

fn parse_label_table(
    value: Option<&toml::Value>,
    name: &str,
) -> Result<Vec<(String, String)>, String> {
    let Some(table) = section(value, name)? else {
        return Ok(Vec::new());
    };

    table
        .iter()
        .map(|(label, raw)| match raw {
            toml::Value::String(target) if !target.trim().is_empty() => {
                Ok((label.clone(), target.trim().to_string()))
            }
            _ => Err(format!("{}.\"{}\" must be a non-empty string", name, label)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensing_domain::RouteMatch;
    use std::io::Write;

    const SAMPLE: &str = r#"
[whitelist.wires]
domains = ["reuters.com", "bloomberg.com"]

[whitelist.central_banks]
domains = ["federalreserve.gov"]

[routing.macro_indicator]
primary_strategy = "structured_api"
fallback_strategy = "news_search"
preferred_apis = ["fred"]
tier_1_domains = ["federalreserve.gov"]
tier_2_domains = ["reuters.com"]

[symbols]
"黄金价格" = "XAUUSD=X"
"铂金" = "PL=F"
"#;

    #[test]
    fn test_parse_sample() {
        let sources = SourcesConfig::parse(SAMPLE).unwrap();

        assert_eq!(
            sources.whitelist.all_domains(),
            &["reuters.com", "bloomberg.com", "federalreserve.gov"]
        );

        let route = sources.routing.resolve("macro_indicator");
        assert_eq!(route.matched, RouteMatch::Exact);
        assert_eq!(route.rule.primary_strategy, Strategy::StructuredApi);
        assert_eq!(route.rule.preferred_providers, vec!["fred"]);

        let fallback = sources.routing.resolve("cause");
        assert!(fallback.is_gap());
        assert_eq!(fallback.rule.tier1_domains.len(), 3);
    }

    #[test]
    fn test_symbols_merge_over_defaults() {
        let sources = SourcesConfig::parse(SAMPLE).unwrap();
        assert_eq!(sources.symbols.lookup("黄金价格").unwrap().value, "XAUUSD=X");
        assert_eq!(sources.symbols.lookup("铂金").unwrap().value, "PL=F");
        assert_eq!(sources.symbols.lookup("bitcoin").unwrap().value, "BTC-USD");
        assert_eq!(sources.fred_series.lookup("美国失业率").unwrap().value, "UNRATE");
    }

    #[test]
    fn test_empty_whitelist_is_rejected() {
        let err = SourcesConfig::parse("[symbols]\ngold = \"GC=F\"").unwrap_err();
        assert!(err.contains("whitelist is empty"));
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let text = r#"
[whitelist.wires]
domains = ["reuters.com"]

[routing.cause]
primary_strategy = "rss_feed"
"#;
        let err = SourcesConfig::parse(text).unwrap_err();
        assert!(err.contains("routing.cause.primary_strategy"));
        assert!(err.contains("rss_feed"));
    }

    #[test]
    fn test_non_string_symbol_is_rejected() {
        let text = "[whitelist.wires]\ndomains = [\"reuters.com\"]\n\n[symbols]\ngold = 1";
        assert!(SourcesConfig::parse(text).unwrap_err().contains("symbols.\"gold\""));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let sources = SourcesConfig::load(file.path()).unwrap();
        assert_eq!(sources.whitelist.len(), 3);
    }

    #[test]
    fn test_missing_file_is_sources_error() {
        let err = SourcesConfig::load(Path::new("/nonexistent/sources.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Sources { .. }));
    }
}
