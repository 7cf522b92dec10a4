//! HTTP API for the media catalog.
//!
//! Translates requests under `/media` into `CatalogManager` calls and maps the
//! outcomes to status codes. Every error response is a JSON object with a
//! single `error` field.

mod error;
mod routes;
mod state;

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::extract::OriginalUri;
use axum::Router;
use log::{error, info};
use tower_http::cors::CorsLayer;

pub use error::{ApiError, ErrorResponse};
pub use routes::{CreateMediaRequest, SearchParams};
pub use state::AppState;

/// Creates the catalog router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found(uri: OriginalUri) -> ApiError {
    ApiError::NotFound(format!("Not found: {}", uri.0.path()))
}

/// Serve the catalog on `bind` until Ctrl-C
pub async fn serve(bind: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;

    info!("Catalog API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await
        .context("Server error")
}

/// Resolves once `signal` fires. A signal that cannot be listened for never resolves.
async fn shutdown_on(signal: impl Future<Output = io::Result<()>>) {
    match signal.await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            error!("Failed to listen for the shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
