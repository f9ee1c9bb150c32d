use anyhow::{Context, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{config::ServerConfig, handlers};

/// Request bodies are three numbers and a word; anything near this is abuse.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Builds the application router.
///
/// Only `POST` is routed on `/api/costeo`; other methods get 405 from axum.
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/costeo", post(handlers::costing::handle_costing))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

/// Binds to the configured address and serves until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    config.validate()?;
    let addr = config.socket_addr()?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("costing endpoint listening on http://{addr}/api/costeo");

    axum::serve(listener, create_router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(?error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, draining connections");
}
