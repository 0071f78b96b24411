//! Invocation registry — correlates outbound calls with inbound replies.

use dashmap::DashMap;

use spoke_core::{CorrelationId, HubReply};

/// Runs when the invocation settles. `None` means no reply will ever come
/// (the connection closed or the registry was drained).
type CompletionHandler = Box<dyn FnOnce(Option<HubReply>) + Send + Sync>;

/// Pending-invocation table: one completion handler per in-flight call.
///
/// Tokens are generated on registration and are unique among everything
/// currently pending (and in practice globally, being UUIDv7 based). A
/// handler fires at most once; removal from the table and firing are one
/// atomic step from the caller's point of view, and the handler itself
/// always runs outside the table's internal locks.
pub struct InvocationRegistry {
    pending: DashMap<CorrelationId, CompletionHandler>,
}

impl InvocationRegistry {
    pub fn new() -> Self {
        Self {
            pending: DashMap::new(),
        }
    }

    /// Register a completion handler, returning the token the reply must
    /// carry. Safe to call concurrently from any number of tasks.
    pub fn register(
        &self,
        on_complete: impl FnOnce(Option<HubReply>) + Send + Sync + 'static,
    ) -> CorrelationId {
        let id = CorrelationId::new();
        self.pending.insert(id.clone(), Box::new(on_complete));
        id
    }

    /// Settle the invocation for `id`, firing its handler with `reply`.
    /// Returns `true` if a pending entry was found; an unknown or
    /// already-settled token is a no-op returning `false`.
    pub fn complete(&self, id: &CorrelationId, reply: Option<HubReply>) -> bool {
        if let Some((_, handler)) = self.pending.remove(id) {
            handler(reply);
            true
        } else {
            false
        }
    }

    /// Drop the entry for `id` without firing its handler.
    pub fn forget(&self, id: &CorrelationId) -> bool {
        self.pending.remove(id).is_some()
    }

    /// Fire every pending handler with `None` (absent reply), returning how
    /// many were settled. For the connection-close path.
    pub fn drain(&self) -> usize {
        let ids: Vec<CorrelationId> = self.pending.iter().map(|e| e.key().clone()).collect();
        let mut settled = 0;
        for id in ids {
            if self.complete(&id, None) {
                settled += 1;
            }
        }
        settled
    }

    pub fn has_pending(&self, id: &CorrelationId) -> bool {
        self.pending.contains_key(id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for InvocationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
