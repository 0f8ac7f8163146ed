//! HTTP binding
//!
//! Routes `/api/github` (any method, the handler gates methods itself) and a
//! plain-text health check at `/`. Every method, `OPTIONS` included, must
//! reach the handler, so no CORS layer is installed.

pub mod api;
pub mod state;

use anyhow::Result;
use axum::{
    routing::{any, get},
    Router,
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Configuration for the web server
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

/// Start the web server and run until a shutdown signal arrives
pub async fn serve(config: WebConfig, state: AppState) -> Result<()> {
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Starting web server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(service_common::shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::health_check))
        .route("/api/github", any(api::github_projects))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
