//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → routing (route key → Relay)
//!     → request.rs (original path, sanitized headers, raw body)
//!     → upstream
//!     → response.rs (status, sanitized headers, content type)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
