//! Response handling and transformation.
//!
//! # Responsibilities
//! - Buffer the upstream reply
//! - Copy status verbatim and sanitized headers for the client
//! - Re-derive content type, omit it entirely for empty bodies
//!
//! # Design Decisions
//! - Whole body is buffered before anything is written to the client
//! - Empty bodies get no content type (some clients reject one)
//! - Missing upstream content type on a non-empty body becomes octet-stream

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;

use crate::relay::RelayError;
use crate::security::headers::{sanitize_response_headers, HeaderList};

/// Content type used when the upstream sends a body without one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An upstream reply, fully buffered and ready to relay.
#[derive(Debug)]
pub struct ForwardedResponse {
    pub status: StatusCode,
    pub headers: HeaderList,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl ForwardedResponse {
    /// Build from upstream parts.
    pub fn from_upstream(status: StatusCode, upstream: &HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers: sanitize_response_headers(upstream),
            content_type: upstream.get(header::CONTENT_TYPE).cloned(),
            body,
        }
    }

    /// Read the full upstream reply into memory.
    pub async fn read(upstream: reqwest::Response) -> Result<Self, RelayError> {
        let status = upstream.status();
        let headers = upstream.headers().clone();
        let body = upstream.bytes().await.map_err(RelayError::UpstreamBody)?;
        Ok(Self::from_upstream(status, &headers, body))
    }

    /// Build the outbound response.
    pub fn into_response(self) -> Response {
        let empty = self.body.is_empty();
        let body = if empty { Body::empty() } else { Body::from(self.body) };

        let mut response = Response::new(body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers.into_header_map();

        if !empty {
            let content_type = self
                .content_type
                .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
            response.headers_mut().insert(header::CONTENT_TYPE, content_type);
        }

        response
    }
}
