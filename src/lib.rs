//! Live Chat Broker - pairs users with human agents over WebSockets
//!
//! Tracks which connections are online as agents, matches chat requests to
//! them, relays messages between the two sides of a chat and unwinds every
//! trace of a connection when it disconnects.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
