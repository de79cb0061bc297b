use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use live_chat_broker::adapters::http::app_router;
use live_chat_broker::adapters::websocket::{ConnectionRegistry, WebSocketState};
use live_chat_broker::application::SessionBroker;
use live_chat_broker::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        match_policy = %config.broker.match_policy,
        "Live chat broker starting"
    );

    let registry = Arc::new(ConnectionRegistry::new());
    let broker = SessionBroker::new_shared(config.broker.match_policy, registry.clone());
    let state = WebSocketState::new(broker, registry);

    let cors_origins = config.server.cors_origins_list();
    if config.is_production() && cors_origins.is_empty() {
        tracing::warn!("No CORS origins configured; allowing any origin in production");
    }
    let app = app_router(state, &cors_origins);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Live chat broker stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter when set.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.json_logs {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().pretty().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
