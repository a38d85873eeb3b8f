//! Relay error type.
//!
//! The relay never translates these itself; the hosting server turns them into
//! 4xx/5xx responses through [`IntoResponse`].

use std::error::Error as _;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use http_body_util::LengthLimitError;

/// Failure of a single relayed call.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("invalid upstream target `{target}`: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to read inbound body: {0}")]
    InboundBody(#[source] axum::Error),
    #[error("upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),
    #[error("failed to read upstream body: {0}")]
    UpstreamBody(#[source] reqwest::Error),
    #[error("failed to build upstream client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl RelayError {
    /// Status the hosting server answers with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InboundBody(e) if exceeds_body_limit(e) => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::InboundBody(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream(e) | RelayError::UpstreamBody(e) if e.is_timeout() => {
                StatusCode::GATEWAY_TIMEOUT
            }
            RelayError::InvalidTarget { .. }
            | RelayError::Upstream(_)
            | RelayError::UpstreamBody(_) => StatusCode::BAD_GATEWAY,
            RelayError::ClientBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// True when the body limit cut off the inbound stream.
///
/// Bodies without `content-length` pass the limit layer and only fail while
/// being read, wrapped in one or more `axum::Error`s.
fn exceeds_body_limit(err: &axum::Error) -> bool {
    let mut source = err.source();
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(status = status.as_u16(), error = %self, "Relay failed");
        let body = status.canonical_reason().unwrap_or("Relay failed");
        (status, body).into_response()
    }
}
