//! Integration tests for the coffee store API.
//!
//! Tests drive the fully assembled router (middleware included) in-process
//! with `tower::ServiceExt::oneshot`, backed by the in-memory document store.
//! No network listener or MongoDB deployment is required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p coffee-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `coffee_routes` - `/coffee` CRUD mapping
//! - `user_routes` - `/users` CRUD mapping
//! - `service_routes` - Liveness, readiness, CORS, request IDs

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use coffee_server::db::MemoryStore;
use coffee_server::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

/// The assembled application plus helpers to call it.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// App backed by a fresh, empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            router: coffee_server::app(Some(AppState::new(store))),
        }
    }

    /// App wrapped in the Sentry layers, as the binary serves it.
    #[must_use]
    pub fn with_error_tracking() -> Self {
        Self {
            router: coffee_server::with_error_tracking(Self::new().router),
        }
    }

    /// App as it runs when the store could not be reached at startup.
    #[must_use]
    pub fn without_store() -> Self {
        Self {
            router: coffee_server::app(None),
        }
    }

    /// Send a request, with an optional JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        self.send(request).await
    }

    /// Send a prebuilt request.
    ///
    /// # Panics
    ///
    /// Panics if the body cannot be read.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// A buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("JSON body")
    }

    /// The body as UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The `insertedId` of an insert response, as a string.
    ///
    /// # Panics
    ///
    /// Panics if the response has no string `insertedId`.
    #[must_use]
    pub fn inserted_id(&self) -> String {
        self.json()["insertedId"]
            .as_str()
            .expect("string insertedId")
            .to_owned()
    }
}
