//! Routing rules: which retrieval strategy to use for an entity type.

use serde::{Deserialize, Serialize};

/// Number of whitelist domains placed in tier 1 of a synthesized default rule.
pub const DEFAULT_TIER1_SIZE: usize = 10;

/// Retrieval strategy, in descending order of trust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Authoritative last-traded quote from a financial data API.
    DirectQuote,
    /// Structured data API (e.g. a statistical series service).
    StructuredApi,
    /// Two-stage news search with consensus validation.
    NewsSearch,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::DirectQuote => "direct_quote",
            Strategy::StructuredApi => "structured_api",
            Strategy::NewsSearch => "news_search",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct_quote" => Ok(Strategy::DirectQuote),
            "structured_api" => Ok(Strategy::StructuredApi),
            "news_search" => Ok(Strategy::NewsSearch),
            other => Err(format!(
                "Unknown strategy: {}. Valid: direct_quote, structured_api, news_search",
                other
            )),
        }
    }
}

/// Routing rule for one entity type.
///
/// # Example
///
/// ```
/// use sensing_domain::routing::{RoutingRule, Strategy};
///
/// let rule = RoutingRule::news_search(
///     vec!["reuters.com".into()],
///     vec!["cnbc.com".into(), "reuters.com".into()],
/// );
/// assert_eq!(rule.primary_strategy, Strategy::NewsSearch);
/// assert_eq!(rule.whitelist_scope(), vec!["reuters.com", "cnbc.com"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRule {
    pub primary_strategy: Strategy,
    #[serde(default)]
    pub fallback_strategy: Option<Strategy>,
    #[serde(default, alias = "preferred_apis")]
    pub preferred_providers: Vec<String>,
    #[serde(default, alias = "tier_1_domains")]
    pub tier1_domains: Vec<String>,
    #[serde(default, alias = "tier_2_domains")]
    pub tier2_domains: Vec<String>,
}

impl RoutingRule {
    /// A plain news-search rule with the given domain tiers.
    pub fn news_search(tier1_domains: Vec<String>, tier2_domains: Vec<String>) -> Self {
        Self {
            primary_strategy: Strategy::NewsSearch,
            fallback_strategy: None,
            preferred_providers: Vec::new(),
            tier1_domains,
            tier2_domains,
        }
    }

    /// The rule synthesized when no exact match exists: news search, with the
    /// first [`DEFAULT_TIER1_SIZE`] whitelist domains in tier 1 and the rest in tier 2.
    pub fn default_for(all_domains: &[String]) -> Self {
        let split = all_domains.len().min(DEFAULT_TIER1_SIZE);
        Self::news_search(
            all_domains[..split].to_vec(),
            all_domains[split..].to_vec(),
        )
    }

    /// `tier1 ∪ tier2`, deduplicated, tier 1 first.
    pub fn whitelist_scope(&self) -> Vec<String> {
        let mut scope: Vec<String> = Vec::new();
        for domain in self.tier1_domains.iter().chain(&self.tier2_domains) {
            if !scope.contains(domain) {
                scope.push(domain.clone());
            }
        }
        scope
    }

    /// Strategies to attempt, in order, without repeats.
    pub fn strategy_order(&self) -> Vec<Strategy> {
        let mut order = vec![self.primary_strategy];
        if let Some(fallback) = self.fallback_strategy
            && fallback != self.primary_strategy
        {
            order.push(fallback);
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domains(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("d{}.com", i)).collect()
    }

    #[test]
    fn test_default_rule_splits_tiers() {
        let rule = RoutingRule::default_for(&domains(14));
        assert_eq!(rule.primary_strategy, Strategy::NewsSearch);
        assert_eq!(rule.tier1_domains.len(), 10);
        assert_eq!(rule.tier2_domains.len(), 4);
        assert_eq!(rule.tier1_domains[0], "d0.com");
        assert_eq!(rule.tier2_domains[0], "d10.com");
    }

    #[test]
    fn test_default_rule_with_few_domains() {
        let rule = RoutingRule::default_for(&domains(3));
        assert_eq!(rule.tier1_domains.len(), 3);
        assert!(rule.tier2_domains.is_empty());

        let empty = RoutingRule::default_for(&[]);
        assert!(empty.whitelist_scope().is_empty());
    }

    #[test]
    fn test_strategy_order() {
        let mut rule = RoutingRule::news_search(vec![], vec![]);
        rule.primary_strategy = Strategy::StructuredApi;
        rule.fallback_strategy = Some(Strategy::NewsSearch);
        assert_eq!(
            rule.strategy_order(),
            vec![Strategy::StructuredApi, Strategy::NewsSearch]
        );

        rule.fallback_strategy = Some(Strategy::StructuredApi);
        assert_eq!(rule.strategy_order(), vec![Strategy::StructuredApi]);
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("news_search".parse::<Strategy>().ok(), Some(Strategy::NewsSearch));
        assert_eq!(
            "Structured_API".parse::<Strategy>().ok(),
            Some(Strategy::StructuredApi)
        );
        assert!("rss".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_rule_deserializes_legacy_field_names() {
        let rule: RoutingRule = serde_json::from_value(serde_json::json!({
            "primary_strategy": "structured_api",
            "fallback_strategy": "news_search",
            "preferred_apis": ["fred"],
            "tier_1_domains": ["federalreserve.gov"],
            "tier_2_domains": ["reuters.com"]
        }))
        .unwrap();
        assert_eq!(rule.preferred_providers, vec!["fred"]);
        assert_eq!(rule.tier1_domains, vec!["federalreserve.gov"]);
        assert_eq!(rule.fallback_strategy, Some(Strategy::NewsSearch));
    }
}
