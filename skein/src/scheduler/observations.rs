use std::collections::BTreeSet;
use std::sync::Arc;

use dashmap::DashMap;

use crate::message::Message;

/// Concurrent map from task index to its stringified result, scoped to a
/// single plan-and-schedule pass (§5: "Target designs must use an explicitly
/// concurrent map").
#[derive(Clone, Default)]
pub struct Observations {
    map: Arc<DashMap<i64, String>>,
}

impl Observations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the map from `FunctionMessage`s already present in the
    /// conversation, so a re-plan round can resolve `$N` against results
    /// from the previous round.
    pub fn seed_from_messages(messages: &[Message]) -> Self {
        let obs = Self::new();
        for message in messages {
            if let Message::Function { idx, content, .. } = message {
                obs.map.insert(*idx, content.clone());
            }
        }
        obs
    }

    pub fn inner(&self) -> &DashMap<i64, String> {
        &self.map
    }

    pub fn insert(&self, idx: i64, value: String) {
        self.map.insert(idx, value);
    }

    pub fn contains_all(&self, deps: &BTreeSet<i64>) -> bool {
        deps.iter().all(|d| self.map.contains_key(d))
    }

    pub fn keys(&self) -> Vec<i64> {
        self.map.iter().map(|entry| *entry.key()).collect()
    }
}
