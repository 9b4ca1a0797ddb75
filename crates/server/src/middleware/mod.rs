//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, `with_error_tracking`)
//! 2. `CatchPanicLayer` (a panicking handler becomes a 500)
//! 3. `TraceLayer` (request tracing)
//! 4. Request ID (add unique ID to each request)
//! 5. CORS (permissive, every origin and method)

pub mod request_id;

pub use request_id::{RequestId, request_id_middleware};
