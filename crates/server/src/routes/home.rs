//! Liveness and readiness handlers.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Banner served at `/`.
pub const BANNER: &str = "Coffee Server Running!!";

/// Root liveness endpoint.
pub async fn index() -> &'static str {
    BANNER
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Pings the document store. Returns 503 Service Unavailable if it does not answer.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Readiness when the store never connected.
pub async fn unavailable() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}
