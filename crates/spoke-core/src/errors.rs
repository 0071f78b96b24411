/// Boxed error for collaborator boundaries (the transport seam).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Typed error hierarchy for hub invocations.
/// Splits failures by where they arise: locally before anything reaches the
/// wire, in the transport send, or in the remote reply.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    // Local — nothing was sent
    #[error("invalid invocation: {0}")]
    InvalidArgument(String),
    #[error("failed to encode invocation: {0}")]
    Encode(#[source] serde_json::Error),

    // Transport — the send itself failed
    #[error("transport send failed: {0}")]
    Transport(#[source] BoxError),

    // Remote — the server settled the invocation
    #[error("{0}")]
    Remote(String),
    #[error("failed to decode result: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("invocation abandoned before completion")]
    Abandoned,
}

impl HubError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// True when the failure happened before anything reached the wire.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::Encode(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Encode(_) => "encode",
            Self::Transport(_) => "transport",
            Self::Remote(_) => "remote",
            Self::Decode(_) => "decode",
            Self::Abandoned => "abandoned",
        }
    }
}
