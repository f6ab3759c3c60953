//! Routing policy: entity type → retrieval strategy and domain tiers.
//!
//! Resolution is an exact match on the entity type. A miss is not an error:
//! a default news-search rule is synthesized from the whitelist and the
//! resolution reports [`RouteMatch::Default`] so the caller can log the gap.

mod rule;

pub use rule::{DEFAULT_TIER1_SIZE, RoutingRule, Strategy};

use crate::whitelist::DomainWhitelist;
use std::collections::HashMap;

/// How a rule was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch {
    Exact,
    /// No rule for the type; the synthesized default was used.
    Default,
}

/// Result of [`RoutingTable::resolve`].
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRoute<'a> {
    pub rule: &'a RoutingRule,
    pub matched: RouteMatch,
}

impl ResolvedRoute<'_> {
    pub fn is_gap(&self) -> bool {
        self.matched == RouteMatch::Default
    }
}

/// Immutable table of routing rules keyed by entity type.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    rules: HashMap<String, RoutingRule>,
    default_rule: RoutingRule,
}

impl RoutingTable {
    pub fn new(rules: HashMap<String, RoutingRule>, whitelist: &DomainWhitelist) -> Self {
        Self {
            rules,
            default_rule: RoutingRule::default_for(whitelist.all_domains()),
        }
    }

    /// Resolve the rule for an entity type.
    pub fn resolve(&self, entity_type: &str) -> ResolvedRoute<'_> {
        match self.rules.get(entity_type) {
            Some(rule) => ResolvedRoute {
                rule,
                matched: RouteMatch::Exact,
            },
            None => ResolvedRoute {
                rule: &self.default_rule,
                matched: RouteMatch::Default,
            },
        }
    }

    pub fn default_rule(&self) -> &RoutingRule {
        &self.default_rule
    }

    pub fn entity_types(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
