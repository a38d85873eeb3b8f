//! Storefront API relay.
//!
//! Mounts a fixed set of route keys (`api`, `identity`, `admin`, ...) and
//! forwards every request under them to the commerce backend named by
//! `ISC_API_URL`, sanitizing headers in both directions.
//!
//! ```text
//!   client ──▶ http::server ──▶ routing (key → Relay) ──▶ relay::dispatcher ──▶ upstream
//!   client ◀── http::response ◀───────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod relay;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::{OriginConfig, RelayConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use relay::{Dispatcher, Relay, RelayError};
