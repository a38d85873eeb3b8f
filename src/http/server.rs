//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with one relay per route key
//! - Wire up middleware (tracing, body limit, request ID)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{OriginConfig, RelayConfig};
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::relay::{Dispatcher, RelayError};
use crate::routing::RouteTable;

/// HTTP server hosting the relays.
pub struct HttpServer {
    router: Router,
    routes: RouteTable,
}

impl HttpServer {
    /// Create a new HTTP server. `origin` must already be resolved.
    pub fn new(config: RelayConfig, origin: OriginConfig) -> Result<Self, RelayError> {
        let dispatcher = Dispatcher::new(origin, &config.upstream)?;
        let routes = RouteTable::new(&dispatcher, config.routes.iter().cloned());
        let router = Self::build_router(&config, routes.clone());

        tracing::info!(
            origin = %dispatcher.origin(),
            routes = config.routes.len(),
            "Relays bound"
        );

        Ok(Self { router, routes })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, routes: RouteTable) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size));

        routes.into_router().layer(middleware)
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = ?self.routes.keys().collect::<Vec<_>>(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                // A closed channel means nobody can ask us to stop.
                if shutdown.recv().await.is_err() {
                    std::future::pending::<()>().await;
                }
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
