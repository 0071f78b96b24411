//! Client-side hub proxy: dynamic method invocation with exactly-once
//! reply correlation, server push events, and hub-scoped key/value state.
//!
//! The proxy sits above an externally owned connection (the [`HubConnection`]
//! seam) and below application code. Outbound calls flow through
//! [`HubProxy::invoke`]; the connection's receive loop feeds inbound traffic
//! back through [`HubProxy::handle_reply`] and [`HubProxy::dispatch_event`].

pub mod connection;
pub mod diagnostics;
pub mod invocations;
pub mod mock;
pub mod proxy;
pub mod state;
pub mod subscriptions;

pub use connection::HubConnection;
pub use diagnostics::{DiagnosticsSnapshot, ProxyDiagnostics};
pub use invocations::InvocationRegistry;
pub use mock::MockConnection;
pub use proxy::{HubProxy, PendingInvocation};
pub use state::StateStore;
pub use subscriptions::{Subscription, SubscriptionRegistry};
