//! Application builder: wires stores, services and the router together.

use axum::Router;

use exampro_core::config::AppConfig;
use exampro_core::error::{AppError, ErrorKind};
use exampro_database::Stores;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application over the given stores.
pub fn build_app(config: AppConfig, stores: Stores) -> Router {
    build_router(AppState::new(config, stores))
}

/// Connects the configured stores and serves HTTP until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ExamPro notification server...");

    let stores = Stores::connect(&config.database).await?;
    let pool = stores.pool.clone();

    let addr = config.server.bind_address();
    let app = build_app(config, stores);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Configuration, format!("Failed to bind {addr}"), e)
    })?;

    tracing::info!("ExamPro server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    if let Some(pool) = pool {
        pool.close().await;
    }

    tracing::info!("ExamPro server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C; shutting down");
    }
    tracing::info!("Shutdown signal received");
}
