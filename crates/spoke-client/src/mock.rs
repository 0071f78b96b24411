use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use spoke_core::{BoxError, HubInvocation};

use crate::connection::HubConnection;

/// Connection double for deterministic tests without a server.
///
/// Records every payload handed to `send` (in order) and can be scripted to
/// fail sends. Inbound traffic is not simulated here; tests drive
/// [`HubProxy::handle_reply`](crate::HubProxy::handle_reply) and
/// [`HubProxy::dispatch_event`](crate::HubProxy::dispatch_event) directly.
#[derive(Default)]
pub struct MockConnection {
    sent: Mutex<Vec<String>>,
    send_count: AtomicUsize,
    fail_with: Mutex<Option<String>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A connection whose every send fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let conn = Self::new();
        *conn.fail_with.lock() = Some(message.into());
        conn
    }

    /// Make subsequent sends fail with `message`, or succeed again with
    /// `None`.
    pub fn set_failure(&self, message: Option<String>) {
        *self.fail_with.lock() = message;
    }

    /// Number of send attempts, including failed ones.
    pub fn send_count(&self) -> usize {
        self.send_count.load(Ordering::Relaxed)
    }

    /// Raw payloads of successful sends, oldest first.
    pub fn sent_payloads(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    pub fn last_payload(&self) -> Option<String> {
        self.sent.lock().last().cloned()
    }

    /// Successful sends parsed back into invocations.
    pub fn sent_invocations(&self) -> serde_json::Result<Vec<HubInvocation>> {
        self.sent
            .lock()
            .iter()
            .map(|payload| serde_json::from_str(payload))
            .collect()
    }
}

#[async_trait]
impl HubConnection for MockConnection {
    async fn send(&self, payload: String) -> Result<(), BoxError> {
        self.send_count.fetch_add(1, Ordering::Relaxed);
        if let Some(message) = self.fail_with.lock().clone() {
            return Err(message.into());
        }
        self.sent.lock().push(payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use spoke_core::{CorrelationId, HubName};

    #[tokio::test]
    async fn records_payloads_in_order() {
        let conn = MockConnection::new();
        conn.send("first".into()).await.unwrap();
        conn.send("second".into()).await.unwrap();

        assert_eq!(conn.send_count(), 2);
        assert_eq!(conn.sent_payloads(), vec!["first", "second"]);
        assert_eq!(conn.last_payload().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn failing_send_returns_error() {
        let conn = MockConnection::failing("connection reset");
        let err = conn.send("payload".into()).await.unwrap_err();

        assert_eq!(err.to_string(), "connection reset");
        assert_eq!(conn.send_count(), 1);
        assert!(conn.sent_payloads().is_empty());
    }

    #[tokio::test]
    async fn set_failure_toggles() {
        let conn = MockConnection::new();
        conn.set_failure(Some("down".into()));
        assert!(conn.send("a".into()).await.is_err());

        conn.set_failure(None);
        assert!(conn.send("b".into()).await.is_ok());
        assert_eq!(conn.sent_payloads(), vec!["b"]);
    }

    #[tokio::test]
    async fn parses_sent_invocations() {
        let conn = MockConnection::new();
        let inv = HubInvocation::new(
            HubName::from("calc"),
            "add",
            vec![json!(1), json!(2)],
            CorrelationId::from_raw("inv_0"),
        );
        conn.send(serde_json::to_string(&inv).unwrap()).await.unwrap();

        let parsed = conn.sent_invocations().unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].method, "add");
        assert_eq!(parsed[0].hub.as_str(), "calc");
    }
}
