//! HTTP server surface

pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::blob::BlobStore;
use crate::error::{Result, VaultsnapError};
use crate::secret::SecretStore;

/// Shared state handed to request handlers
pub struct AppState {
    pub secrets: Arc<dyn SecretStore>,
    pub blobs: Arc<dyn BlobStore>,
    /// Function-level authorization key; `None` leaves the endpoint open
    pub function_key: Option<String>,
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/backup-restore", post(handlers::backup_restore))
        .route("/healthz", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(host: &str, port: u16, state: AppState) -> Result<()> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| VaultsnapError::config(format!("Failed to bind {addr}: {e}")))?;

    info!(address = addr.as_str(), "listening");

    axum::serve(listener, build_router(state))
        .await
        .map_err(VaultsnapError::IoError)?;

    Ok(())
}
