//! Per-run memo tables keyed by fully-qualified class name.

use std::collections::HashMap;

use super::context::RequestKind;
use super::index::{AggregateInfo, ClassIndex};

/// A memo table: computes a value once per key.
#[derive(Debug, Clone)]
pub struct Memo<V> {
    table: HashMap<String, V>,
}

impl<V> Default for Memo<V> {
    fn default() -> Self {
        Self {
            table: HashMap::new(),
        }
    }
}

impl<V: Clone> Memo<V> {
    pub fn get_or_insert_with(&mut self, key: &str, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.table.get(key) {
            return value.clone();
        }
        let value = compute();
        self.table.insert(key.to_string(), value.clone());
        value
    }

    /// Record a value, replacing any memoized one.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        self.table.insert(key.into(), value);
    }
}

/// Classification caches for one collector run.
#[derive(Debug, Default)]
pub struct ClassificationCache {
    pub aggregate_info: Memo<Option<AggregateInfo>>,
    pub domain_event: Memo<bool>,
    pub integration_event: Memo<bool>,
    pub request_kind: Memo<RequestKind>,
    roots_by_name: HashMap<String, String>,
}

impl ClassificationCache {
    /// Start from the roots the index registered.
    pub fn new(index: &ClassIndex) -> Self {
        Self {
            roots_by_name: index.roots_by_name().clone(),
            ..Self::default()
        }
    }

    pub fn root_for(&self, aggregate: &str) -> Option<&str> {
        self.roots_by_name.get(aggregate).map(String::as_str)
    }

    /// Register a root discovered during traversal unless the aggregate
    /// already has one.
    pub fn register_root(&mut self, aggregate: &str, fq: &str) {
        self.roots_by_name
            .entry(aggregate.to_string())
            .or_insert_with(|| fq.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_computes_once() {
        let mut memo = Memo::default();
        let mut calls = 0;
        for _ in 0..3 {
            let v = memo.get_or_insert_with("k", || {
                calls += 1;
                7
            });
            assert_eq!(v, 7);
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_register_root_first_wins() {
        let mut cache = ClassificationCache::default();
        cache.register_root("Order", "a.Order");
        cache.register_root("Order", "b.Order");
        assert_eq!(cache.root_for("Order"), Some("a.Order"));
    }
}
