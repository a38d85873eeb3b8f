//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for tracing
//! - Recover the original path and query of an inbound request
//! - Prepare the sanitized request for forwarding upstream
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing, and forwarded upstream
//! - Path and query are taken verbatim, never re-encoded or normalized
//! - The body is forwarded as raw bytes, never parsed

use axum::body::Bytes;
use axum::extract::OriginalUri;
use axum::http::{request::Parts, HeaderMap, HeaderName, Method, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use url::Url;

use crate::relay::RelayError;
use crate::security::headers::{sanitize_request_headers, HeaderList};

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs for requests that arrive without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        id.parse().ok().map(RequestId::new)
    }
}

/// Path and query exactly as the client sent them.
///
/// Prefers [`OriginalUri`] so the value is unaffected by router nesting.
pub fn original_path_and_query(parts: &Parts) -> &str {
    let uri = parts
        .extensions
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or(&parts.uri);
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/")
}

/// A request ready to be sent upstream.
#[derive(Debug)]
pub struct ForwardedRequest {
    pub method: Method,
    pub target: Url,
    pub headers: HeaderList,
    pub body: Bytes,
}

impl ForwardedRequest {
    /// Build the upstream request: method copied, headers sanitized, raw body kept.
    pub fn new(method: Method, target: Url, inbound: &HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            target,
            headers: sanitize_request_headers(inbound),
            body,
        }
    }

    /// Send to the upstream and wait for the status line and headers.
    pub async fn send(self, client: &reqwest::Client) -> Result<reqwest::Response, RelayError> {
        let mut builder = client
            .request(self.method, self.target)
            .headers(self.headers.into_header_map());
        if !self.body.is_empty() {
            builder = builder.body(self.body);
        }
        builder.send().await.map_err(RelayError::Upstream)
    }
}
