//! Flow-state capability supplied by the host engine.

use std::collections::BTreeMap;

use serde_json::Value;

/// Per-flow key/value storage owned by the host.
///
/// Transient values live for the current step chain only; shared values are
/// kept for the rest of the flow.
pub trait NodeState {
    /// Stores a value in transient state, replacing any previous value.
    fn store_transient(&mut self, key: &str, value: Value);

    /// Stores a value in shared state, replacing any previous value.
    fn store_shared(&mut self, key: &str, value: Value);
}

/// In-memory [`NodeState`] for embedding hosts and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryNodeState {
    transient: BTreeMap<String, Value>,
    shared: BTreeMap<String, Value>,
}

impl InMemoryNodeState {
    /// Creates empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns transient value for `key`.
    pub fn transient(&self, key: &str) -> Option<&Value> {
        self.transient.get(key)
    }

    /// Returns shared value for `key`.
    pub fn shared(&self, key: &str) -> Option<&Value> {
        self.shared.get(key)
    }

    /// Returns `true` when shared state holds nothing.
    pub fn shared_is_empty(&self) -> bool {
        self.shared.is_empty()
    }
}

impl NodeState for InMemoryNodeState {
    fn store_transient(&mut self, key: &str, value: Value) {
        self.transient.insert(key.to_string(), value);
    }

    fn store_shared(&mut self, key: &str, value: Value) {
        self.shared.insert(key.to_string(), value);
    }
}
