//! Webhook server.
//!
//! Exposes `POST /webhook`, which relays a list of item ids to GetItems and
//! answers with normalized items, and `GET /health`.

pub mod error;
pub mod handlers;

use crate::amazon::client::ProductApi;
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::{ApiError, ApiResult};
pub use handlers::{HealthResponse, WebhookResponse};

/// Shared, immutable state of the server.
pub struct AppState {
    /// Upstream client
    pub api: Arc<dyn ProductApi>,
    /// Tag appended to affiliate links
    pub partner_tag: String,
}

impl AppState {
    /// Creates the server state.
    pub fn new(api: Arc<dyn ProductApi>, partner_tag: impl Into<String>) -> Self {
        Self { api, partner_tag: partner_tag.into() }
    }
}

/// Builds the router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/webhook", post(handlers::webhook))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serves on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown).await
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
