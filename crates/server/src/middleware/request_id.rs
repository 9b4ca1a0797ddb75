//! Correlation ids for API calls.
//!
//! A caller (or the proxy in front of the server) may send `x-request-id`.
//! Ids that are empty, longer than [`MAX_REQUEST_ID_LEN`] or contain anything
//! but visible ASCII are replaced with a fresh UUID v4, so a client cannot
//! inject arbitrary text into logs or Sentry tags. The id ends up on the
//! `http_request` span, as a Sentry tag, in the request extensions and on the
//! response.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id that is kept.
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// The id assigned to the request being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Keep `supplied` if it is a usable id, otherwise generate one.
    #[must_use]
    pub fn from_header(supplied: Option<&HeaderValue>) -> Self {
        supplied
            .and_then(|value| value.to_str().ok())
            .filter(|id| is_usable(id))
            .map_or_else(|| Self(Uuid::new_v4().to_string()), |id| Self(id.to_owned()))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_usable(id: &str) -> bool {
    !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN && id.bytes().all(|b| b.is_ascii_graphic())
}

/// Tag every request with a [`RequestId`] and echo it on the response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_header(request.headers().get(REQUEST_ID_HEADER));

    // Runs inside the `http_request` span opened by the trace layer.
    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", request_id.as_str()));

    request.extensions_mut().insert(request_id.clone());
    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_supplied_id_is_kept() {
        let header = HeaderValue::from_static("brew-42");
        assert_eq!(RequestId::from_header(Some(&header)).as_str(), "brew-42");
    }

    #[test]
    fn test_missing_id_is_generated() {
        let id = RequestId::from_header(None);
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_unusable_ids_are_replaced() {
        let too_long = "x".repeat(MAX_REQUEST_ID_LEN + 1);
        for supplied in ["", "has space", too_long.as_str()] {
            let header = HeaderValue::from_str(supplied).unwrap();
            let id = RequestId::from_header(Some(&header));
            assert_ne!(id.as_str(), supplied);
            assert!(Uuid::parse_str(id.as_str()).is_ok());
        }
    }
}
