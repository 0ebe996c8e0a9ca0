//! Redirect resolution.
//!
//! Decides whether a scanned response calls for another hop and, if so,
//! where that hop goes. Relative locations are resolved against the host
//! the response came from; absolute ones are taken as-is.
//!
//! ## Author
//! a13x.h.cc@gmail.com

use tracing::debug;
use url::Url;

use crate::error::FetchError;
use crate::parsers::ResponseScan;

/// Where a request is sent. Built fresh for every hop.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub host: String,
    pub port: u16,
    pub path: String,
}

/// Work out the next hop, if the response asks for one.
///
/// Returns `Ok(None)` for non-redirect statuses and for a 301/302 that
/// carries no `Location` header at all.
pub fn next_target(scan: &ResponseScan, current_host: &str) -> Result<Option<Target>, FetchError> {
    let code = match scan.status.as_ref().map(|s| s.code) {
        Some(code @ (301 | 302)) => code,
        _ => return Ok(None),
    };

    let location = match &scan.redirect_location {
        Some(location) => location,
        None => return Ok(None),
    };

    debug!(code, location = %location, "Redirect detected");
    resolve_location(current_host, location).map(Some)
}

/// Resolve a `Location` value against the host the response came from.
///
/// A value starting with `http` is an absolute URL; anything else is a path
/// on the current host. The resolved port is the URL's explicit port or 80,
/// and only the path component is carried over to the next hop.
pub fn resolve_location(current_host: &str, location: &str) -> Result<Target, FetchError> {
    let absolute = if location.starts_with("http") {
        location.to_string()
    } else {
        // Relative locations are re-anchored on the current host. The
        // rebuilt URL names no port, so the next hop lands on 80.
        format!("http://{}{}", current_host, location)
    };

    let url = Url::parse(&absolute).map_err(|source| FetchError::BadLocation {
        location: location.to_string(),
        source,
    })?;

    let host = url.host_str().ok_or_else(|| FetchError::BadLocation {
        location: location.to_string(),
        source: url::ParseError::EmptyHost,
    })?;

    Ok(Target {
        host: host.to_string(),
        port: url.port().unwrap_or(80),
        path: url.path().to_string(),
    })
}
