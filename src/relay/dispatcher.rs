//! Relay construction and per-call forwarding.
//!
//! # Responsibilities
//! - Own the shared upstream client and the resolved origin
//! - Create one [`Relay`] per route prefix
//! - Forward a call: sanitize, send, buffer, rebuild
//!
//! # Design Decisions
//! - Timeouts are explicit (connect + total) instead of client defaults
//! - Redirects are relayed to the client, not followed
//! - Transport errors are returned, never retried or swallowed
//! - Dropping the handler future (client went away) aborts the upstream call

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use url::Url;

use crate::config::{OriginConfig, TargetShape, UpstreamConfig};
use crate::http::request::{original_path_and_query, ForwardedRequest};
use crate::http::response::ForwardedResponse;
use crate::observability::metrics;
use crate::relay::error::RelayError;
use crate::relay::target::target_url;

/// Builds relays that share one origin and one upstream client.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    origin: Arc<OriginConfig>,
    client: reqwest::Client,
    target_shape: TargetShape,
}

impl Dispatcher {
    /// Create a dispatcher for an already-resolved origin.
    pub fn new(origin: OriginConfig, config: &UpstreamConfig) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy()
            .build()
            .map_err(RelayError::ClientBuild)?;

        tracing::debug!(
            origin = %origin,
            connect_timeout_secs = config.connect_timeout_secs,
            request_timeout_secs = config.request_timeout_secs,
            target_shape = ?config.target_shape,
            "Dispatcher ready"
        );

        Ok(Self {
            origin: Arc::new(origin),
            client,
            target_shape: config.target_shape,
        })
    }

    pub fn origin(&self) -> &OriginConfig {
        &self.origin
    }

    /// Create a forwarding function bound to `prefix`.
    pub fn create_relay(&self, prefix: impl Into<String>) -> Relay {
        Relay {
            inner: Arc::new(RelayInner {
                prefix: prefix.into(),
                origin: Arc::clone(&self.origin),
                client: self.client.clone(),
                target_shape: self.target_shape,
            }),
        }
    }
}

#[derive(Debug)]
struct RelayInner {
    prefix: String,
    origin: Arc<OriginConfig>,
    client: reqwest::Client,
    target_shape: TargetShape,
}

/// A forwarding function for one route prefix. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Relay {
    inner: Arc<RelayInner>,
}

impl Relay {
    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }

    /// Upstream URL for an inbound path and query.
    pub fn target_for(&self, path_and_query: &str) -> String {
        target_url(
            &self.inner.origin,
            &self.inner.prefix,
            self.inner.target_shape,
            path_and_query,
        )
    }

    /// Relay one request and return the rebuilt upstream response.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response, RelayError> {
        let start = Instant::now();
        let method = request.method().clone();

        let result = self.relay(request).await;

        let status = result.as_ref().ok().map(|r| r.status().as_u16());
        metrics::record_relay(&self.inner.prefix, method.as_str(), status, start);
        result
    }

    async fn relay(&self, request: Request<Body>) -> Result<Response, RelayError> {
        let (parts, body) = request.into_parts();
        let original = original_path_and_query(&parts).to_string();
        let target = self.target_for(&original);

        tracing::info!(
            method = %parts.method,
            path = %original,
            target = %target,
            "Relaying request"
        );

        let url = Url::parse(&target).map_err(|source| RelayError::InvalidTarget {
            target: target.clone(),
            source,
        })?;
        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .map_err(RelayError::InboundBody)?;

        let upstream = ForwardedRequest::new(parts.method, url, &parts.headers, body)
            .send(&self.inner.client)
            .await?;
        let reply = ForwardedResponse::read(upstream).await?;

        tracing::debug!(
            target = %target,
            status = reply.status.as_u16(),
            bytes = reply.body.len(),
            "Upstream replied"
        );

        Ok(reply.into_response())
    }
}
