//! Top-level router assembling the WebSocket and health endpoints.

use axum::{routing::get, Router};
use http::{HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::adapters::websocket::{websocket_router, WebSocketState};

use super::health::health;

/// Creates the application router with all endpoints.
///
/// An empty `cors_origins` list allows any origin.
pub fn app_router(state: WebSocketState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(websocket_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origins)),
        )
        .with_state(state)
}

/// CORS policy for browser clients.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Skipping invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}
