//! # Spoke
//!
//! Client-side stub for hub-style RPC endpoints: invoke remote methods by
//! name at runtime, receive server-pushed events, and mirror hub-scoped
//! key/value state, all over a transport you own.
//!
//! ## Key components
//!
//! * **[`HubProxy`]:** the entry point. One proxy per hub; it correlates
//!   each outbound invocation to its asynchronous reply, routes push
//!   events to subscriptions, and keeps the hub's state store.
//! * **[`HubConnection`]:** the transport seam. Implement it over your
//!   WebSocket/long-poll/whatever client and feed inbound traffic back
//!   through [`HubProxy::handle_reply`] and [`HubProxy::dispatch_event`].
//! * **[`HubInvocation`] & [`HubReply`]:** the JSON wire shapes exchanged
//!   with the server.
//! * **[`MockConnection`]:** an in-memory connection for tests.
//!
//! Logging setup for applications lives in [`telemetry`].
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use spoke::{HubProxy, HubReply, MockConnection};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let connection = Arc::new(MockConnection::new());
//! let proxy = HubProxy::new(connection.clone(), "calc");
//!
//! // The invocation is on the wire once this returns; the reply settles it.
//! let pending = proxy
//!     .invoke_detached::<i64>("add", vec![json!(1), json!(2)])
//!     .await
//!     .unwrap();
//!
//! // Normally the connection's receive loop does this.
//! let sent_invocations = connection.sent_invocations().unwrap();
//! let sent = &sent_invocations[0];
//! proxy.handle_reply(HubReply::result(sent.callback_id.clone(), json!(3)));
//!
//! assert_eq!(pending.await.unwrap(), 3);
//! # }
//! ```

pub use spoke_client::{
    DiagnosticsSnapshot, HubConnection, HubProxy, InvocationRegistry, MockConnection,
    PendingInvocation, ProxyDiagnostics, StateStore, Subscription, SubscriptionRegistry,
};
pub use spoke_core::{BoxError, CorrelationId, HubError, HubInvocation, HubName, HubReply};

pub use spoke_telemetry as telemetry;
