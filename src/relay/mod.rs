//! Request relay subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request (mounted route key)
//!     → dispatcher.rs (Relay bound to the key's prefix)
//!     → target.rs ({origin}{prefix}{path?query})
//!     → http/request.rs (sanitized headers, raw body) → upstream
//!     → http/response.rs (status, sanitized headers, content type, body)
//!     → client
//! ```
//!
//! # Design Decisions
//! - One shared upstream client, one immutable origin for every relay
//! - No per-request shared mutable state, so no locks
//! - Errors propagate to the host as `RelayError`

pub mod dispatcher;
pub mod error;
pub mod target;

pub use dispatcher::{Dispatcher, Relay};
pub use error::RelayError;
