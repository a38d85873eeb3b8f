//! Upstream target construction.
//!
//! Plain string concatenation: no slash handling, no re-encoding. With the
//! default origin and the `admin` route, `/admin/foo?x=1` becomes
//! `https://commerce.local.com/admin/admin/foo?x=1`.

use crate::config::{OriginConfig, TargetShape};

/// Build the upstream URL for one inbound request.
pub fn target_url(
    origin: &OriginConfig,
    prefix: &str,
    shape: TargetShape,
    path_and_query: &str,
) -> String {
    match shape {
        TargetShape::Prefixed => format!("{}{}{}", origin.as_str(), prefix, path_and_query),
        TargetShape::OriginalUrl => format!("{}{}", origin.as_str(), path_and_query),
    }
}
