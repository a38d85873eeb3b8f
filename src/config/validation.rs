//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route keys are mountable and distinct
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check listener and metrics addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no routes configured")]
    NoRoutes,
    #[error("route key is empty")]
    EmptyRoute,
    #[error("route key `{0}` contains `/`")]
    RouteContainsSlash(String),
    #[error("route key `{0}` is listed more than once")]
    DuplicateRoute(String),
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("{field} `{value}` is not a socket address")]
    BadAddress { field: &'static str, value: String },
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    let mut seen = HashSet::new();
    for route in &config.routes {
        if route.is_empty() {
            errors.push(ValidationError::EmptyRoute);
        } else if route.contains('/') {
            errors.push(ValidationError::RouteContainsSlash(route.clone()));
        } else if !seen.insert(route.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.clone()));
        }
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::Zero("upstream.connect_timeout_secs"));
    }
    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("upstream.request_timeout_secs"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BadAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::BadAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
