//! HTTP adapters - router assembly and the health endpoint.

pub mod health;
pub mod routes;

pub use routes::{app_router, cors_layer};
