//! Coffee Server - HTTP API over the `coffee` and `users` collections.
//!
//! This crate provides the server as a library, allowing the assembled router
//! to be tested without a network listener or a live database.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and JSON out
//! - One document store handle shared by every request (MongoDB in
//!   production, in-memory for development and tests)
//! - Each route performs exactly one store operation and returns its raw result

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::{
    Router,
    http::{Request, Response},
    routing::get,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use state::AppState;

/// Assemble the application router.
///
/// With no state (the store could not be reached at startup) only the
/// liveness routes are served; collection routes fall through to 404 and
/// readiness reports 503.
pub fn app(state: Option<AppState>) -> Router {
    let base = Router::new()
        .route("/", get(routes::home::index))
        .route("/health", get(routes::home::health));

    let router = match state {
        Some(state) => base.merge(routes::routes().with_state(state)),
        None => base.route("/health/ready", get(routes::home::unavailable)),
    };

    router
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record("latency_ms", u64::try_from(latency.as_millis()).unwrap_or(u64::MAX));
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .layer(CatchPanicLayer::new())
}

/// Wrap `router` in the Sentry hub and HTTP transaction layers.
///
/// Applied outermost so every request, including 404s, runs in its own hub.
pub fn with_error_tracking(router: Router) -> Router {
    router
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
