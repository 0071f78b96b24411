use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::{CorrelationId, HubName};

/// One outbound call to a named hub method.
///
/// Wire format: `{ Hub, Method, Args, CallbackId, State? }`. `State` is
/// omitted entirely when the client has no state to report.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HubInvocation {
    pub hub: HubName,
    pub method: String,
    pub args: Vec<Value>,
    pub callback_id: CorrelationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Map<String, Value>>,
}

/// The inbound message settling one invocation.
///
/// Wire format: `{ CallbackId, Error?, Result?, State? }`. A reply carrying
/// `Error` short-circuits: `Result` and `State` are ignored for it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HubReply {
    pub callback_id: CorrelationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Map<String, Value>>,
}

impl HubInvocation {
    pub fn new(
        hub: HubName,
        method: impl Into<String>,
        args: Vec<Value>,
        callback_id: CorrelationId,
    ) -> Self {
        Self {
            hub,
            method: method.into(),
            args,
            callback_id,
            state: None,
        }
    }

    pub fn with_state(mut self, state: Map<String, Value>) -> Self {
        self.state = Some(state);
        self
    }
}

impl HubReply {
    /// Bare acknowledgement: no result, no error, no state.
    pub fn empty(callback_id: CorrelationId) -> Self {
        Self {
            callback_id,
            error: None,
            result: None,
            state: None,
        }
    }

    pub fn result(callback_id: CorrelationId, result: Value) -> Self {
        Self {
            result: Some(result),
            ..Self::empty(callback_id)
        }
    }

    pub fn error(callback_id: CorrelationId, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::empty(callback_id)
        }
    }

    pub fn with_state(mut self, state: Map<String, Value>) -> Self {
        self.state = Some(state);
        self
    }
}
