//! Foundation module - Shared domain primitives.
//!
//! Contains the identifier and status value objects that form the
//! vocabulary of the live chat domain.

mod agent_status;
mod ids;

pub use agent_status::AgentStatus;
pub use ids::ConnectionId;
