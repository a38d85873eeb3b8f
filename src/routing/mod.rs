//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     routes (config) + Dispatcher
//!     → router.rs (one Relay per key)
//!     → axum Router (`/{key}`, `/{key}/{*rest}`)
//!     → Freeze as immutable Router
//!
//! Incoming Request (path)
//!     → axum path match on first segment
//!     → bound Relay
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Match is on the whole first path segment, not a string prefix

pub mod router;

pub use router::{RouteBinding, RouteTable};
