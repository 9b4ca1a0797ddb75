//! Unified error handling with Sentry integration.
//!
//! Every failure a handler can hit surfaces through one `AppError` and one
//! response mapping. There is no per-route status logic: anything that goes
//! wrong is a generic 500, and the details stay in logs and Sentry.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use coffee_core::RecordIdError;
use thiserror::Error;

use crate::db::StoreError;

/// Application-level error type for the coffee server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A path id is not a well-formed store identifier.
    #[error("Invalid id: {0}")]
    InvalidId(#[from] RecordIdError),

    /// Document store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Request error"
        );

        // Don't expose internal error details to clients
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
