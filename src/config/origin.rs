//! Upstream origin resolution.
//!
//! # Responsibilities
//! - Read `ISC_API_URL` once at bootstrap
//! - Substitute a default when absent, add `https://` when the scheme is missing
//! - Trim surrounding whitespace
//! - Produce an immutable [`OriginConfig`] for the dispatcher
//!
//! # Design Decisions
//! - Nothing here is fatal: bad input is corrected and logged
//! - The process environment is read, never written back
//! - Relays capture the resolved value at construction; later env changes are ignored

use std::fmt;

/// Environment variable holding the upstream origin.
pub const ORIGIN_ENV: &str = "ISC_API_URL";

/// Origin used when `ISC_API_URL` is unset.
pub const DEFAULT_ORIGIN: &str = "https://commerce.local.com/";

/// Correction applied while resolving the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginCorrection {
    /// No value was configured; [`DEFAULT_ORIGIN`] was substituted.
    Defaulted,
    /// The value had no `http(s)://` scheme; `https://` was prepended.
    SchemePrefixed,
}

/// The resolved upstream origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginConfig {
    url: String,
    correction: Option<OriginCorrection>,
}

impl OriginConfig {
    /// Resolve the origin from `ISC_API_URL`.
    pub fn from_env() -> Self {
        let raw = std::env::var(ORIGIN_ENV).ok();
        Self::resolve(raw.as_deref())
    }

    /// Resolve the origin from a raw configured value.
    pub fn resolve(raw: Option<&str>) -> Self {
        let raw = raw.map(str::trim).filter(|v| !v.is_empty());

        let (url, correction) = match raw {
            None => {
                tracing::warn!(
                    "{} environment variable not found, defaulting to {}",
                    ORIGIN_ENV,
                    DEFAULT_ORIGIN
                );
                (DEFAULT_ORIGIN.to_string(), Some(OriginCorrection::Defaulted))
            }
            Some(value) if !has_http_scheme(value) => {
                tracing::warn!(
                    value = %value,
                    "{} doesn't start with `http`, prefixing with `https://`",
                    ORIGIN_ENV
                );
                (format!("https://{value}"), Some(OriginCorrection::SchemePrefixed))
            }
            Some(value) => (value.to_string(), None),
        };
        let url = url.trim().to_string();

        if let Err(e) = url::Url::parse(&url) {
            tracing::warn!(origin = %url, error = %e, "Upstream origin does not parse as a URL");
        }

        tracing::info!(origin = %url, "Server-side API URL resolved");

        Self { url, correction }
    }

    /// The origin string, used verbatim as the start of every target URL.
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// The correction applied during resolution, if any.
    pub fn correction(&self) -> Option<OriginCorrection> {
        self.correction
    }
}

impl fmt::Display for OriginConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

fn has_http_scheme(value: &str) -> bool {
    let lower = value.get(..8).unwrap_or(value).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
