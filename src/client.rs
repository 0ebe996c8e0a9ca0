//! Request execution.
//!
//! Drives the whole fetch: connect, send the request, scan the response,
//! then follow 301/302 redirects. Redirects are followed iteratively under
//! a hop limit, and each hop's connection lives only for that iteration,
//! so the transport is released before the next hop starts even when the
//! scan fails.
//!
//! ## Author
//! a13x.h.cc@gmail.com

use std::io::{BufReader, Write};
use std::net::TcpStream;

use tracing::{debug, info};

use crate::config::FetchSettings;
use crate::error::FetchError;
use crate::parsers::ResponseScan;
use crate::redirect::{self, Target};
use crate::request;

/// Fetch `path` from `host:port`, echoing the full wire transcript to
/// `transcript`, and follow any 301/302 redirects.
///
/// Every hop opens its own connection with `Connection: close`, so the body
/// runs until the peer hangs up. The chain aborts with
/// [`FetchError::TooManyRedirects`] once more than `settings.max_redirects`
/// hops would be needed.
pub fn send_request<W: Write>(
    host: &str,
    port: u16,
    path: &str,
    settings: &FetchSettings,
    transcript: &mut W,
) -> Result<(), FetchError> {
    let mut target = Target {
        host: host.to_string(),
        port,
        path: path.to_string(),
    };
    let mut hops = 0usize;

    loop {
        let scan = execute_exchange(&target, transcript)?;

        match redirect::next_target(&scan, &target.host)? {
            Some(next) => {
                hops += 1;
                if hops > settings.max_redirects {
                    return Err(FetchError::TooManyRedirects {
                        limit: settings.max_redirects,
                    });
                }
                info!(
                    hop = hops,
                    host = %next.host,
                    port = next.port,
                    path = %next.path,
                    "Following redirect"
                );
                target = next;
            }
            None => return Ok(()),
        }
    }
}

/// Run one request/response exchange against `target`.
///
/// The TCP stream and both of its wrappers are scoped to this function, so
/// the connection is closed before the caller acts on the result, on the
/// error path included.
fn execute_exchange<W: Write>(
    target: &Target,
    transcript: &mut W,
) -> Result<ResponseScan, FetchError> {
    info!(host = %target.host, port = target.port, path = %target.path, "Connecting");

    let stream =
        TcpStream::connect((target.host.as_str(), target.port)).map_err(|source| {
            FetchError::Connect {
                host: target.host.clone(),
                port: target.port,
                source,
            }
        })?;

    let mut writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);

    request::write_get_request(&mut writer, &target.host, &target.path)?;
    debug!("Request sent, scanning response");

    let scan = ResponseScan::read_from(&mut reader, transcript)?;
    if let Some(status) = &scan.status {
        info!(
            version = %status.version,
            code = status.code,
            reason = %status.reason,
            "Response status"
        );
    }
    Ok(scan)
}
