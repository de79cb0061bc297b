//! Broker domain module.
//!
//! Tracks which connections are agents, who is chatting with whom, and
//! decides what each inbound event should emit.
//!
//! # States
//!
//! A connection is at any instant unregistered, an available agent, or
//! paired. There is no other per-connection bookkeeping.
//!
//! # Events
//!
//! - `agent_status` - Broadcast when an agent comes online or goes offline
//! - `new_live_chat` / `live_chat_connected` - Sent to both sides of a new match
//! - `no_agents_available` - Sent to a requester nobody could take
//! - `receive_message` - Relayed chat text
//! - `chat_ended` - Sent to the survivor of a pairing

mod agent_pool;
mod events;
mod pairing_table;
mod policy;
mod state;

pub use agent_pool::AgentPool;
pub use events::{BrokerEvent, Emission, Target};
pub use pairing_table::PairingTable;
pub use policy::MatchPolicy;
pub use state::{BrokerSnapshot, BrokerState};
