//! Domain layer containing the broker's business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (connection ids, agent status)
//! - `broker` - Agent pool, pairing table and the state machine over them

pub mod broker;
pub mod foundation;
