use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

/// Monotonic counters for wire-path outcomes that are deliberately not
/// errors (unmatched replies and events are silent no-ops on the protocol
/// side). Cloning shares the underlying counters.
#[derive(Clone, Debug, Default)]
pub struct ProxyDiagnostics {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    invocations_sent: AtomicU64,
    replies_matched: AtomicU64,
    replies_unmatched: AtomicU64,
    events_dispatched: AtomicU64,
    events_unmatched: AtomicU64,
}

impl ProxyDiagnostics {
    pub(crate) fn record_invocation_sent(&self) {
        self.inner.invocations_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_reply_matched(&self) {
        self.inner.replies_matched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_reply_unmatched(&self) {
        self.inner.replies_unmatched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_event_dispatched(&self) {
        self.inner.events_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_event_unmatched(&self) {
        self.inner.events_unmatched.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            invocations_sent: self.inner.invocations_sent.load(Ordering::Relaxed),
            replies_matched: self.inner.replies_matched.load(Ordering::Relaxed),
            replies_unmatched: self.inner.replies_unmatched.load(Ordering::Relaxed),
            events_dispatched: self.inner.events_dispatched.load(Ordering::Relaxed),
            events_unmatched: self.inner.events_unmatched.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of the proxy counters at one point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticsSnapshot {
    pub invocations_sent: u64,
    pub replies_matched: u64,
    pub replies_unmatched: u64,
    pub events_dispatched: u64,
    pub events_unmatched: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_counters_are_zero() {
        let diagnostics = ProxyDiagnostics::default();
        assert_eq!(diagnostics.snapshot(), DiagnosticsSnapshot::default());
    }

    #[test]
    fn clones_share_counters() {
        let diagnostics = ProxyDiagnostics::default();
        let handle = diagnostics.clone();

        handle.record_invocation_sent();
        handle.record_reply_unmatched();
        handle.record_reply_unmatched();

        let snapshot = diagnostics.snapshot();
        assert_eq!(snapshot.invocations_sent, 1);
        assert_eq!(snapshot.replies_unmatched, 2);
        assert_eq!(snapshot.replies_matched, 0);
    }

    #[test]
    fn snapshot_serializes_for_logging() {
        let diagnostics = ProxyDiagnostics::default();
        diagnostics.record_event_dispatched();

        let json = serde_json::to_value(diagnostics.snapshot()).unwrap();
        assert_eq!(json["events_dispatched"], 1);
        assert_eq!(json["events_unmatched"], 0);
    }
}
