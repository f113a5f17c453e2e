//! Location header rewriting.
//!
//! The legacy service returns absolute redirect URLs carrying its own
//! container hostname, following the deprecated RFC 2616 rule that redirects
//! must be absolute. RFC 7231 permits relative references, so removing the
//! stale prefix leaves a path that resolves against whatever host and port
//! the client used to reach the proxy.

use axum::http::{header, HeaderMap, HeaderValue};

/// Strip the first occurrence of `stale_prefix` from the `Location` header.
///
/// Leaves the headers untouched when `Location` is absent, is not valid
/// UTF-8, does not contain the prefix, or the stripped value would not be a
/// valid header value. Never fails: a response must be delivered whether or
/// not it was rewritten. Returns whether a rewrite happened.
///
/// Only the first occurrence is removed. A value that contains the prefix
/// twice still contains it once afterwards; that matches the upstream
/// behaviour this sidecar exists to paper over and is intentional.
pub fn rewrite_location(headers: &mut HeaderMap, stale_prefix: &str) -> bool {
    let Some(location) = headers.get(header::LOCATION) else {
        return false;
    };
    let Ok(location) = location.to_str() else {
        return false;
    };
    if !location.contains(stale_prefix) {
        return false;
    }

    let stripped = location.replacen(stale_prefix, "", 1);
    match HeaderValue::from_str(&stripped) {
        Ok(value) => {
            headers.insert(header::LOCATION, value);
            true
        }
        Err(_) => false,
    }
}
