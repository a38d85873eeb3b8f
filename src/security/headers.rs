//! Header sanitization for both relay directions.
//!
//! # Responsibilities
//! - Drop `host`, `origin`, `referer` before forwarding upstream
//! - Drop `accept-encoding` so the upstream client negotiates only codings it decodes
//! - Drop transport-managed and identity-leaking headers from upstream replies
//! - Keep header order and define multi-value semantics explicitly
//!
//! # Design Decisions
//! - `HeaderName` is always lowercase, so table lookups are case-insensitive
//! - Inbound multi-valued headers collapse to their first value (known lossy behaviour)
//! - Outbound multi-valued headers keep every value, in upstream order

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};

/// `x-powered-by` has no constant in `http`.
pub const X_POWERED_BY: HeaderName = HeaderName::from_static("x-powered-by");

/// Headers never forwarded to the upstream.
///
/// Forwarding `host`, `origin` or `referer` makes the upstream see a
/// mismatched virtual host or reject the call as cross-origin. The upstream
/// client sets its own `accept-encoding`; a client-chosen coding it cannot
/// decode would reach the caller still compressed once `content-encoding`
/// is stripped from the reply.
pub fn is_stripped_inbound(name: &HeaderName) -> bool {
    name == header::HOST
        || name == header::ORIGIN
        || name == header::REFERER
        || name == header::ACCEPT_ENCODING
}

/// Headers never copied from the upstream reply.
///
/// Length and encoding are recomputed by the outbound server, `server` and
/// `x-powered-by` leak upstream identity, and `content-type` is re-derived.
pub fn is_stripped_outbound(name: &HeaderName) -> bool {
    name == header::CONTENT_ENCODING
        || name == header::CONTENT_LENGTH
        || name == header::CONTENT_TYPE
        || name == header::DATE
        || name == header::SERVER
        || name == X_POWERED_BY
}

/// An ordered list of header pairs. A name may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderList(Vec<(HeaderName, HeaderValue)>);

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: HeaderName, value: HeaderValue) {
        self.0.push((name, value));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.0.iter().map(|(n, v)| (n, v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when any entry has this name.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n.as_str().eq_ignore_ascii_case(name))
    }

    /// Every value for `name`, in list order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a HeaderValue> + 'a {
        self.0
            .iter()
            .filter(move |(n, _)| n.as_str().eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Build a `HeaderMap`, appending so repeated names keep every value.
    pub fn into_header_map(self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.0.len());
        for (name, value) in self.0 {
            map.append(name, value);
        }
        map
    }
}

/// Headers to send upstream: every inbound header except the stripped ones,
/// one entry per name carrying the first value.
pub fn sanitize_request_headers(inbound: &HeaderMap) -> HeaderList {
    let mut headers = HeaderList::new();
    for name in inbound.keys() {
        if is_stripped_inbound(name) {
            continue;
        }
        if let Some(first) = inbound.get(name) {
            headers.push(name.clone(), first.clone());
        }
    }
    headers
}

/// Headers to copy to the outbound response: every upstream header except
/// the stripped ones, all values kept.
pub fn sanitize_response_headers(upstream: &HeaderMap) -> HeaderList {
    let mut headers = HeaderList::new();
    for (name, value) in upstream.iter() {
        if is_stripped_outbound(name) {
            continue;
        }
        headers.push(name.clone(), value.clone());
    }
    headers
}
