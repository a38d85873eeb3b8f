//! Route binding table.
//!
//! # Responsibilities
//! - Create one relay per configured route key
//! - Mount each relay at `/{key}` and `/{key}/{*rest}` for any method
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Every binding shares the dispatcher's origin and client
//! - Unmounted paths fall through to axum's 404

use axum::body::Body;
use axum::http::Request;
use axum::routing::any;
use axum::Router;

use crate::relay::{Dispatcher, Relay};

/// One route key bound to its relay.
#[derive(Debug, Clone)]
pub struct RouteBinding {
    pub key: String,
    pub relay: Relay,
}

/// The full set of route bindings.
#[derive(Debug, Clone)]
pub struct RouteTable {
    bindings: Vec<RouteBinding>,
}

impl RouteTable {
    /// Bind every key to a relay created with that key as prefix.
    pub fn new<I, S>(dispatcher: &Dispatcher, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bindings = keys
            .into_iter()
            .map(|key| {
                let key = key.into();
                RouteBinding {
                    relay: dispatcher.create_relay(key.clone()),
                    key,
                }
            })
            .collect();
        Self { bindings }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.key.as_str())
    }

    /// Mount every binding on an axum router.
    pub fn into_router(self) -> Router {
        let mut router = Router::new();
        for binding in self.bindings {
            let handler = any(move |request: Request<Body>| {
                let relay = binding.relay.clone();
                async move { relay.forward(request).await }
            });
            router = router
                .route(&format!("/{}", binding.key), handler.clone())
                .route(&format!("/{}/{{*rest}}", binding.key), handler);
        }
        router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::DEFAULT_ROUTES;
    use crate::config::{OriginConfig, UpstreamConfig};

    #[test]
    fn binds_every_default_route() {
        let dispatcher = Dispatcher::new(
            OriginConfig::resolve(Some("https://commerce.local.com/")),
            &UpstreamConfig::default(),
        )
        .unwrap();
        let table = RouteTable::new(&dispatcher, DEFAULT_ROUTES);

        assert_eq!(table.keys().collect::<Vec<_>>(), DEFAULT_ROUTES.to_vec());
        for binding in &table.bindings {
            assert_eq!(binding.relay.prefix(), binding.key);
        }
    }
}
