//! Health endpoint reporting broker occupancy.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::adapters::websocket::WebSocketState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub connections: usize,
    pub agents_online: usize,
    pub active_pairings: usize,
}

/// GET /health - Liveness plus current connection and pairing counts
pub async fn health(State(state): State<WebSocketState>) -> Json<HealthResponse> {
    let snapshot = state.broker.snapshot();

    Json(HealthResponse {
        status: "ok",
        connections: state.registry.connection_count(),
        agents_online: snapshot.agents_online,
        active_pairings: snapshot.active_pairings,
    })
}
