//! WebSocket adapters - the transport carrying broker events.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  frames   ┌──────────────┐  events   ┌───────────────┐
//! │   client     │ ────────▶ │  handler     │ ────────▶ │ SessionBroker │
//! └──────────────┘           └──────────────┘           └───────────────┘
//!        ▲                                                      │
//!        │ writer task       ┌──────────────────────┐  deliver  │
//!        └────────────────── │  ConnectionRegistry  │ ◀─────────┘
//!                            └──────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - JSON frame protocol types
//! - [`registry`] - Live connections and outbound delivery
//! - [`handler`] - Axum WebSocket upgrade handler and connection lifecycle

pub mod handler;
pub mod messages;
pub mod registry;

pub use handler::{websocket_router, ws_handler, WebSocketState};
pub use messages::{ClientMessage, ProtocolError, ServerMessage};
pub use registry::{ConnectionRegistry, ConnectionSender};
