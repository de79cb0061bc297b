//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `EventSink` - Delivery of broker emissions to live connections

mod event_sink;

pub use event_sink::EventSink;
