//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the upstream origin, exactly once, before any relay exists
//! - Start the metrics endpoint when enabled
//! - Build the server, bind the listener, serve until a signal arrives
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use tokio::net::TcpListener;

use crate::config::{OriginConfig, RelayConfig};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::relay::RelayError;

/// Fatal startup or serve error.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to build relay: {0}")]
    Relay(#[from] RelayError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Run the relay host with origin taken from the environment.
pub async fn run(config: RelayConfig) -> Result<(), StartupError> {
    let origin = OriginConfig::from_env();
    run_with_origin(config, origin).await
}

/// Run the relay host against an already-resolved origin.
pub async fn run_with_origin(config: RelayConfig, origin: OriginConfig) -> Result<(), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.upstream.request_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config, origin)?;

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            addr: bind_address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::trigger_on_signal(shutdown));

    server
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve)
}
