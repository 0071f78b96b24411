use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use spoke_core::HubError;

/// Hub-scoped key/value state mirrored between client and server.
///
/// Keys compare case-insensitively; they are folded to lower case on every
/// insert and lookup, so `set("X", ..)` and `get("x")` hit the same entry.
/// Cloning a `StateStore` yields another handle to the same shared map.
#[derive(Clone, Debug, Default)]
pub struct StateStore {
    entries: Arc<RwLock<Map<String, Value>>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn fold(name: &str) -> String {
        name.to_lowercase()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.entries.read().get(&Self::fold(name)).cloned()
    }

    /// Typed read over [`get`](Self::get); `Ok(None)` when the key is absent.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, HubError> {
        match self.get(name) {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(HubError::Decode),
            None => Ok(None),
        }
    }

    /// Insert or overwrite an entry; last write wins.
    pub fn set(&self, name: &str, value: Value) {
        self.entries.write().insert(Self::fold(name), value);
    }

    /// Copy of the current entries for embedding in an outgoing invocation.
    /// `None` when the store is empty so the wire payload omits the field.
    pub fn snapshot(&self) -> Option<Map<String, Value>> {
        let entries = self.entries.read();
        if entries.is_empty() {
            None
        } else {
            Some(entries.clone())
        }
    }

    /// Apply a server-reported update, entry by entry.
    pub fn merge(&self, update: Map<String, Value>) {
        let mut entries = self.entries.write();
        for (name, value) in update {
            entries.insert(Self::fold(&name), value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
