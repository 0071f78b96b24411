//! Core types for the spoke hub client: branded ids, the hub wire
//! protocol structs, and the error hierarchy shared by all crates.

pub mod errors;
pub mod ids;
pub mod protocol;

pub use errors::{BoxError, HubError};
pub use ids::{CorrelationId, HubName};
pub use protocol::{HubInvocation, HubReply};
