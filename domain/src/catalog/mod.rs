//! Curated label → identifier tables.
//!
//! Lookup is two-phase: an exact match on the normalized label, then a linear
//! containment scan in either direction (`"gold price today"` matches
//! `"gold price"`, `"gold"` matches `"gold price"`). Tables are small, so the
//! scan is fine.

mod defaults;

pub use defaults::{default_fred_series, default_symbols};

use crate::core::string::normalize_label;
use std::collections::HashMap;

/// How a label was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMatch {
    Exact,
    /// Containment match via the given table key.
    Fuzzy,
}

/// A lookup hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelHit<'a, V> {
    pub key: &'a str,
    pub value: &'a V,
    pub matched: LabelMatch,
}

/// Label index with exact-then-containment lookup.
///
/// Keys keep insertion order for the containment scan, so earlier entries win
/// when several keys overlap a label.
#[derive(Debug, Clone)]
pub struct LabelIndex<V> {
    exact: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V> Default for LabelIndex<V> {
    fn default() -> Self {
        Self {
            exact: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V> LabelIndex<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. Replacing keeps the original scan position.
    pub fn insert(&mut self, label: &str, value: V) {
        let key = normalize_label(label);
        if key.is_empty() {
            return;
        }
        match self.exact.get(&key) {
            Some(&idx) => self.entries[idx].1 = value,
            None => {
                self.exact.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Merge overrides on top of this index.
    pub fn extend<I, K>(&mut self, items: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        for (label, value) in items {
            self.insert(label.as_ref(), value);
        }
    }

    pub fn lookup(&self, label: &str) -> Option<LabelHit<'_, V>> {
        let needle = normalize_label(label);
        if needle.is_empty() {
            return None;
        }

        if let Some(&idx) = self.exact.get(&needle) {
            let (key, value) = &self.entries[idx];
            return Some(LabelHit {
                key,
                value,
                matched: LabelMatch::Exact,
            });
        }

        self.entries
            .iter()
            .find(|(key, _)| needle.contains(key.as_str()) || key.contains(needle.as_str()))
            .map(|(key, value)| LabelHit {
                key,
                value,
                matched: LabelMatch::Fuzzy,
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for LabelIndex<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> LabelIndex<&'static str> {
        [("黄金", "GC=F"), ("黄金价格", "GC=F"), ("gold price", "GC=F"), ("dxy", "DX-Y.NYB")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let idx = index();
        let hit = idx.lookup("  DXY ").unwrap();
        assert_eq!(*hit.value, "DX-Y.NYB");
        assert_eq!(hit.matched, LabelMatch::Exact);
    }

    #[test]
    fn test_containment_both_directions() {
        let idx = index();
        let wider = idx.lookup("gold price today").unwrap();
        assert_eq!(wider.key, "gold price");
        assert_eq!(wider.matched, LabelMatch::Fuzzy);

        let narrower = idx.lookup("gold").unwrap();
        assert_eq!(narrower.key, "gold price");

        let cjk = idx.lookup("国际黄金价格走势").unwrap();
        assert_eq!(cjk.key, "黄金");
    }

    #[test]
    fn test_miss_and_empty() {
        let idx = index();
        assert!(idx.lookup("美联储利率").is_none());
        assert!(idx.lookup("   ").is_none());
    }

    #[test]
    fn test_override_replaces_in_place() {
        let mut idx = index();
        idx.insert("DXY", "DXY-ALT");
        assert_eq!(idx.len(), 4);
        assert_eq!(*idx.lookup("dxy").unwrap().value, "DXY-ALT");
    }
}
