//! Error types for jester-fetch.
//!
//! One enum covers every way a fetch can fail, so callers can match on the
//! condition instead of inspecting error strings.
//!
//! ## Author
//! a13x.h.cc@gmail.com

use std::io;
use thiserror::Error;

/// Errors produced while executing a fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The TCP connection to the target could not be established.
    #[error("Failed to connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// The status line claims HTTP/1.1 but its status code token is missing
    /// or not numeric.
    #[error("Malformed status line: {line:?}")]
    MalformedStatus { line: String },

    /// The redirect chain exceeded the configured hop limit.
    #[error("Redirect limit of {limit} hop(s) exceeded")]
    TooManyRedirects { limit: usize },

    /// A Location header value could not be resolved into a target.
    #[error("Invalid redirect location {location:?}: {source}")]
    BadLocation {
        location: String,
        #[source]
        source: url::ParseError,
    },

    /// Any other I/O failure while talking to the peer.
    #[error("I/O error during exchange: {0}")]
    Io(#[from] io::Error),
}
