use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::Value;

type EventHandler = Arc<dyn Fn(&[Value]) + Send + Sync>;

/// Handler list for one named server event.
///
/// Handles are shared: every subscribe for a given name returns the same
/// `Subscription`, so a handler attached through any handle fires for
/// events routed to that name.
#[derive(Default)]
pub struct Subscription {
    handlers: RwLock<Vec<EventHandler>>,
}

impl Subscription {
    /// Attach a handler; it runs for every dispatch from now on. Past
    /// dispatches are not replayed.
    pub fn on(&self, handler: impl Fn(&[Value]) + Send + Sync + 'static) {
        self.handlers.write().push(Arc::new(handler));
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Invoke handlers in attachment order. The list is snapshotted first,
    /// so handlers attached concurrently miss this dispatch and no lock is
    /// held while user code runs.
    fn dispatch(&self, args: &[Value]) {
        let handlers: Vec<EventHandler> = self.handlers.read().clone();
        for handler in handlers {
            handler(args);
        }
    }
}

/// Event-name → subscription table; names compare case-insensitively.
pub struct SubscriptionRegistry {
    subscriptions: DashMap<String, Arc<Subscription>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self {
            subscriptions: DashMap::new(),
        }
    }

    fn fold(name: &str) -> String {
        name.to_lowercase()
    }

    /// Get or create the subscription for `event_name`. Idempotent: repeat
    /// calls return the same shared handle, never a fresh list.
    pub fn subscribe(&self, event_name: &str) -> Arc<Subscription> {
        self.subscriptions
            .entry(Self::fold(event_name))
            .or_default()
            .clone()
    }

    /// Route one server event to its handlers. Returns `false` (and does
    /// nothing) when nothing ever subscribed to the name.
    pub fn dispatch(&self, event_name: &str, args: &[Value]) -> bool {
        let subscription = match self.subscriptions.get(&Self::fold(event_name)) {
            Some(entry) => Arc::clone(entry.value()),
            None => return false,
        };
        subscription.dispatch(args);
        true
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
