//! Hub proxy — the public face of one hub: outbound invocations, inbound
//! reply/event routing, and state access.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::oneshot;

use spoke_core::{CorrelationId, HubError, HubInvocation, HubName, HubReply};

use crate::connection::HubConnection;
use crate::diagnostics::{DiagnosticsSnapshot, ProxyDiagnostics};
use crate::invocations::InvocationRegistry;
use crate::state::StateStore;
use crate::subscriptions::{Subscription, SubscriptionRegistry};

/// Client-side stub for one named hub.
///
/// Method names are plain strings resolved at runtime; there is no
/// compile-time registration. Each invocation is correlated to its reply by
/// a generated token, carries a snapshot of the hub's state when any
/// exists, and settles exactly once. Inbound traffic enters through
/// [`handle_reply`](Self::handle_reply) and
/// [`dispatch_event`](Self::dispatch_event), called by the connection's
/// receive loop from whatever task it runs on.
///
/// The proxy spawns nothing and holds no locks across sends or user
/// handlers; wrap it in an [`Arc`] to share between the invoking side and
/// the receive loop.
pub struct HubProxy {
    hub: HubName,
    connection: Arc<dyn HubConnection>,
    invocations: InvocationRegistry,
    state: StateStore,
    subscriptions: SubscriptionRegistry,
    diagnostics: ProxyDiagnostics,
}

impl HubProxy {
    pub fn new(connection: Arc<dyn HubConnection>, hub: impl Into<HubName>) -> Self {
        Self {
            hub: hub.into(),
            connection,
            invocations: InvocationRegistry::new(),
            state: StateStore::new(),
            subscriptions: SubscriptionRegistry::new(),
            diagnostics: ProxyDiagnostics::default(),
        }
    }

    pub fn hub(&self) -> &HubName {
        &self.hub
    }

    /// Invoke `method` on the hub and await its reply.
    ///
    /// Settlement follows the reply: a server error settles as
    /// [`HubError::Remote`] with the server's message verbatim; a result
    /// value is decoded to `T`; a reply with neither (or no reply at all,
    /// via [`abort_pending`](Self::abort_pending)) settles as
    /// `Ok(T::default())`. A reply's state update is merged into the hub
    /// state before the call returns.
    pub async fn invoke<T>(&self, method: &str, args: Vec<Value>) -> Result<T, HubError>
    where
        T: DeserializeOwned + Default + Send + 'static,
    {
        self.invoke_detached(method, args).await?.await
    }

    /// Untyped [`invoke`](Self::invoke); an absent result settles as
    /// `Value::Null`.
    pub async fn invoke_value(&self, method: &str, args: Vec<Value>) -> Result<Value, HubError> {
        self.invoke(method, args).await
    }

    /// Start an invocation and return once the send is issued, leaving the
    /// reply to be awaited (or dropped) separately.
    ///
    /// An empty `method` fails with [`HubError::InvalidArgument`] before
    /// any token is allocated. A transport failure fails with
    /// [`HubError::Transport`] and leaves the registered completion entry
    /// behind, never to fire; [`abort_pending`](Self::abort_pending)
    /// reclaims such entries. Dropping the returned handle abandons only
    /// the awaited value: the reply, if one arrives, is still processed
    /// and its state update still merged.
    pub async fn invoke_detached<T>(
        &self,
        method: &str,
        args: Vec<Value>,
    ) -> Result<PendingInvocation<T>, HubError>
    where
        T: DeserializeOwned + Default + Send + 'static,
    {
        if method.is_empty() {
            return Err(HubError::invalid_argument("method name is empty"));
        }

        let (tx, rx) = oneshot::channel::<Result<T, HubError>>();
        let state = self.state.clone();
        let correlation_id = self.invocations.register(move |reply| {
            let _ = tx.send(settle(reply, &state));
        });

        let mut invocation =
            HubInvocation::new(self.hub.clone(), method, args, correlation_id.clone());
        if let Some(snapshot) = self.state.snapshot() {
            invocation = invocation.with_state(snapshot);
        }

        let payload = match serde_json::to_string(&invocation) {
            Ok(payload) => payload,
            Err(e) => {
                self.invocations.forget(&correlation_id);
                return Err(HubError::Encode(e));
            }
        };

        match self.connection.send(payload).await {
            Ok(()) => {
                self.diagnostics.record_invocation_sent();
                tracing::debug!(
                    hub = %self.hub,
                    method,
                    correlation_id = %correlation_id,
                    "Invocation sent"
                );
                Ok(PendingInvocation { rx, correlation_id })
            }
            Err(e) => {
                tracing::warn!(
                    hub = %self.hub,
                    method,
                    correlation_id = %correlation_id,
                    error = %e,
                    "Transport send failed"
                );
                Err(HubError::Transport(e))
            }
        }
    }

    /// Route a correlated reply to its pending invocation. A reply whose
    /// token matches nothing is dropped; returns whether it matched.
    pub fn handle_reply(&self, reply: HubReply) -> bool {
        let correlation_id = reply.callback_id.clone();
        if self.invocations.complete(&correlation_id, Some(reply)) {
            self.diagnostics.record_reply_matched();
            true
        } else {
            self.diagnostics.record_reply_unmatched();
            tracing::warn!(
                hub = %self.hub,
                correlation_id = %correlation_id,
                "Dropping reply with no pending invocation"
            );
            false
        }
    }

    /// Route a server push event to its subscription. An event nothing
    /// subscribed to is dropped; returns whether it was delivered.
    pub fn dispatch_event(&self, event_name: &str, args: &[Value]) -> bool {
        if self.subscriptions.dispatch(event_name, args) {
            self.diagnostics.record_event_dispatched();
            true
        } else {
            self.diagnostics.record_event_unmatched();
            tracing::debug!(
                hub = %self.hub,
                event = event_name,
                "Dropping event with no subscription"
            );
            false
        }
    }

    /// Get or create the subscription for `event_name`; repeat calls for
    /// the same name (any casing) return the same shared handle.
    pub fn subscribe(&self, event_name: &str) -> Arc<Subscription> {
        self.subscriptions.subscribe(event_name)
    }

    /// Subscribe and attach a handler in one step.
    pub fn on(
        &self,
        event_name: &str,
        handler: impl Fn(&[Value]) + Send + Sync + 'static,
    ) -> Arc<Subscription> {
        let subscription = self.subscribe(event_name);
        subscription.on(handler);
        subscription
    }

    /// Attach a typed handler fed the event's first argument decoded to
    /// `T`. Events with no first argument, or one that fails to decode,
    /// are skipped for this handler.
    pub fn on_json<T, F>(&self, event_name: &str, handler: F) -> Arc<Subscription>
    where
        T: DeserializeOwned,
        F: Fn(T) + Send + Sync + 'static,
    {
        let event = event_name.to_owned();
        self.on(event_name, move |args| {
            let Some(first) = args.first() else {
                return;
            };
            match serde_json::from_value::<T>(first.clone()) {
                Ok(value) => handler(value),
                Err(e) => {
                    tracing::debug!(event = %event, error = %e, "Skipping undecodable event argument");
                }
            }
        })
    }

    /// Current value for a state key (any casing), if present.
    pub fn state(&self, name: &str) -> Option<Value> {
        self.state.get(name)
    }

    /// Typed read of a state key.
    pub fn state_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, HubError> {
        self.state.get_as(name)
    }

    /// Set a state key locally; the next invocation carries it to the
    /// server.
    pub fn set_state(&self, name: &str, value: Value) {
        self.state.set(name, value);
    }

    /// Settle every outstanding invocation with the absent-reply fallback
    /// (`Ok(T::default())`). For the connection-close path.
    pub fn abort_pending(&self) -> usize {
        let drained = self.invocations.drain();
        if drained > 0 {
            tracing::info!(hub = %self.hub, drained, "Flushed pending invocations");
        }
        drained
    }

    /// Invocations awaiting a reply right now.
    pub fn pending_count(&self) -> usize {
        self.invocations.pending_count()
    }

    pub fn diagnostics(&self) -> DiagnosticsSnapshot {
        self.diagnostics.snapshot()
    }
}

/// Turn a reply (or its absence) into the invocation's outcome, applying
/// any state update first so it is visible once the caller resumes.
fn settle<T>(reply: Option<HubReply>, state: &StateStore) -> Result<T, HubError>
where
    T: DeserializeOwned + Default,
{
    let Some(reply) = reply else {
        return Ok(T::default());
    };
    if let Some(message) = reply.error {
        return Err(HubError::Remote(message));
    }
    if let Some(update) = reply.state {
        state.merge(update);
    }
    match reply.result {
        Some(value) => serde_json::from_value(value).map_err(HubError::Decode),
        None => Ok(T::default()),
    }
}

pin_project_lite::pin_project! {
    /// Handle for an invocation already on the wire; resolves when the
    /// reply settles it. Yields [`HubError::Abandoned`] if the proxy is
    /// dropped first.
    pub struct PendingInvocation<T> {
        #[pin]
        rx: oneshot::Receiver<Result<T, HubError>>,
        correlation_id: CorrelationId,
    }
}

impl<T> PendingInvocation<T> {
    /// Token the reply must carry to settle this invocation.
    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }
}

impl<T> Future for PendingInvocation<T> {
    type Output = Result<T, HubError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match this.rx.poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Err(HubError::Abandoned)),
            Poll::Pending => Poll::Pending,
        }
    }
}
