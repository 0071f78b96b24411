use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Correlation token tying one outbound invocation to its eventual reply.
///
/// Generated values are prefixed UUIDv7 strings, so they sort by creation
/// time and never collide across concurrently pending invocations.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn new() -> Self {
        Self(format!("inv_{}", Uuid::now_v7()))
    }

    /// Wrap a token received off the wire without generating a new one.
    pub fn from_raw(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CorrelationId {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl AsRef<str> for CorrelationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Name of the remote endpoint group a proxy talks to.
///
/// Opaque to this crate; fixed for the lifetime of a proxy.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HubName(String);

impl HubName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HubName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HubName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for HubName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for HubName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
