//! HTTP request serialization.
//!
//! Builds the one request shape this client speaks: a GET request line,
//! the mandatory `Host` header, and `Connection: close`, terminated by the
//! blank line that ends the header block.
//!
//! ## Author
//! a13x.h.cc@gmail.com

use std::io::{self, Write};

/// Write a complete GET request to `writer` and flush it.
///
/// `Connection: close` is always sent, so the end of the response body is
/// signaled by the peer closing the stream.
pub fn write_get_request<W: Write>(writer: &mut W, host: &str, path: &str) -> io::Result<()> {
    writer.write_all(format!("GET {} HTTP/1.1\r\n", path).as_bytes())?;
    writer.write_all(format!("Host: {}\r\n", host).as_bytes())?;
    writer.write_all(b"Connection: close\r\n")?;
    // The empty line ends the header block; the server will not start
    // processing without it.
    writer.write_all(b"\r\n")?;
    writer.flush()
}
