use async_trait::async_trait;

use spoke_core::BoxError;

/// Transport seam between the proxy and whatever moves the bytes.
///
/// Implementations own the connection lifecycle, framing, and delivery; the
/// proxy only hands them fully serialized invocation payloads. `send`
/// resolving means the payload was handed off, not that any reply arrived.
///
/// The receive direction is not part of this trait: the connection's read
/// loop is expected to route correlated replies to
/// [`HubProxy::handle_reply`](crate::HubProxy::handle_reply) and push
/// events to [`HubProxy::dispatch_event`](crate::HubProxy::dispatch_event).
#[async_trait]
pub trait HubConnection: Send + Sync {
    /// Send one serialized invocation to the server.
    async fn send(&self, payload: String) -> Result<(), BoxError>;
}
