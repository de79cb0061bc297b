//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `websocket` - WebSocket transport and the live connection registry
//! - `http` - Router assembly, CORS and health endpoint
//! - `memory` - Recording event sink for tests

pub mod http;
pub mod memory;
pub mod websocket;

pub use memory::RecordingSink;
pub use websocket::{ConnectionRegistry, WebSocketState};
