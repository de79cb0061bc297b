//! Application layer - orchestrates domain state behind a consistency boundary.
//!
//! - `SessionBroker` - The single lock over the agent pool and pairing table

mod session_broker;

pub use session_broker::SessionBroker;
