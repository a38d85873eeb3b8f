//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request:
//!     → RequestBodyLimitLayer (security.max_body_size)
//!     → headers.rs (drop host/origin/referer)
//!     → upstream
//!
//! Upstream reply:
//!     → headers.rs (drop length/encoding/type/date/server/x-powered-by)
//!     → client
//! ```
//!
//! # Design Decisions
//! - Header tables are fixed; no per-route overrides
//! - No trust decisions are made here, the upstream enforces auth

pub mod headers;
