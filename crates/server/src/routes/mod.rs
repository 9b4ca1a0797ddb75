//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                 - Liveness banner
//! GET    /health           - Health check
//! GET    /health/ready     - Store connectivity check
//!
//! # Coffee
//! GET    /coffee           - List every coffee item
//! POST   /coffee           - Insert the body verbatim
//! GET    /coffee/{id}      - Fetch one coffee item (null if absent)
//! PUT    /coffee/{id}      - Upsert the seven coffee fields
//! DELETE /coffee/{id}      - Delete one coffee item
//!
//! # Users
//! GET    /users            - List every user
//! POST   /users            - Insert the body verbatim
//! PATCH  /users            - Set lastSignIn on the user matched by email
//! DELETE /users/{id}       - Delete one user
//! ```
//!
//! Each handler performs exactly one store operation and returns its raw
//! result as JSON.

pub mod coffee;
pub mod home;
pub mod users;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

/// Create the coffee routes router.
pub fn coffee_routes() -> Router<AppState> {
    Router::new()
        .route("/coffee", get(coffee::list).post(coffee::create))
        .route(
            "/coffee/{id}",
            get(coffee::show).put(coffee::replace).delete(coffee::delete),
        )
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(users::list)
                .post(users::create)
                .patch(users::record_sign_in),
        )
        .route("/users/{id}", delete(users::delete))
}

/// Create all store-backed routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health/ready", get(home::readiness))
        .merge(coffee_routes())
        .merge(user_routes())
}
