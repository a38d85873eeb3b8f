//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.
//!
//! The upstream origin is deliberately absent: it comes from `ISC_API_URL`
//! through [`crate::config::origin::OriginConfig`].

use serde::{Deserialize, Serialize};

/// Route keys mounted when the config file does not list any.
pub const DEFAULT_ROUTES: [&str; 10] = [
    "api",
    "identity",
    "systemresources",
    "ckfinder",
    "admin",
    "bundles",
    "userfiles",
    "email",
    "excel",
    "sitemap",
];

/// Root configuration for the relay host.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream client behaviour (timeouts, target shape).
    pub upstream: UpstreamConfig,

    /// Mounted route keys, each bound to its own relay.
    pub routes: Vec<String>,

    /// Request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            upstream: UpstreamConfig::default(),
            routes: DEFAULT_ROUTES.iter().map(|r| r.to_string()).collect(),
            security: SecurityConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// How the upstream URL is assembled from origin, route prefix and path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetShape {
    /// `{origin}{prefix}{original path and query}`.
    #[default]
    Prefixed,
    /// `{origin}{original path and query}`, ignoring the route prefix.
    OriginalUrl,
}

/// Upstream client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total time allowed for one upstream call, body included, in seconds.
    pub request_timeout_secs: u64,

    /// Target URL construction mode.
    pub target_shape: TargetShape,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            request_timeout_secs: 60,
            target_shape: TargetShape::Prefixed,
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 32 * 1024 * 1024, // 32MB, large enough for userfiles uploads
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: RelayConfig = toml::from_str("").unwrap();
        assert_eq!(config.routes.len(), DEFAULT_ROUTES.len());
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
        assert_eq!(config.upstream.target_shape, TargetShape::Prefixed);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: RelayConfig = toml::from_str(
            r#"
            routes = ["api", "admin"]

            [upstream]
            target_shape = "original_url"
            request_timeout_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.routes, vec!["api", "admin"]);
        assert_eq!(config.upstream.target_shape, TargetShape::OriginalUrl);
        assert_eq!(config.upstream.request_timeout_secs, 10);
        assert_eq!(config.upstream.connect_timeout_secs, 5);
    }
}
