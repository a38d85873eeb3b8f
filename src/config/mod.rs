//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!
//! ISC_API_URL (environment, read once at bootstrap)
//!     → origin.rs (default / scheme fix / trim)
//!     → OriginConfig (immutable, handed to the dispatcher)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod origin;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use origin::{OriginConfig, OriginCorrection};
pub use schema::{
    ListenerConfig, ObservabilityConfig, RelayConfig, SecurityConfig, TargetShape, UpstreamConfig,
};
