//! HTTP response scanning.
//!
//! This module provides the `ResponseScan` type which reads an HTTP/1.1
//! response line by line, echoing every line to a transcript sink while
//! capturing the status line and the last `Location` header seen.
//!
//! ## Author
//! a13x.h.cc@gmail.com

use std::io::{BufRead, Write};
use tracing::{debug, warn};

use crate::error::FetchError;

/// The parsed first line of a response: `HTTP/1.1 200 OK`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub version: String,
    pub code: u16,
    pub reason: String,
}

/// What one response scan extracted.
///
/// `status` stays `None` when the first line does not carry the `HTTP/1.1`
/// token. `redirect_location` holds the value of the last `Location` header
/// observed, however many were sent; an empty value still counts as seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseScan {
    pub status: Option<StatusLine>,
    pub redirect_location: Option<String>,
}

impl ResponseScan {
    /// Scan a full response from `reader`, echoing every line to `transcript`.
    ///
    /// Header lines are read until the blank separator; the stream ending
    /// early is tolerated and simply ends the headers. The body is then
    /// drained verbatim until the peer closes. Every line reaches the
    /// transcript before it is inspected, so the transcript is complete even
    /// when scanning fails midway.
    #[tracing::instrument(skip(reader, transcript), level = "debug")]
    pub fn read_from<R: BufRead, W: Write>(
        reader: &mut R,
        transcript: &mut W,
    ) -> Result<Self, FetchError> {
        let mut scan = ResponseScan::default();
        let mut first_line = true;

        // Header phase: one line at a time until the blank separator.
        loop {
            let mut raw = String::new();
            if reader.read_line(&mut raw)? == 0 {
                // Stream ended before the blank line. The header block is
                // simply over and there is no body to drain.
                warn!("Stream closed before end of headers");
                return Ok(scan);
            }
            let line = raw.trim_end_matches(['\r', '\n']);
            writeln!(transcript, "{}", line)?;

            if line.is_empty() {
                break;
            }
            scan.inspect_header_line(line, first_line)?;
            first_line = false;
        }

        debug!(
            status = scan.status.as_ref().map(|s| s.code),
            redirect = scan.redirect_location.as_deref(),
            "End of headers"
        );

        // Body phase: echo verbatim until the peer closes the stream.
        loop {
            let mut raw = String::new();
            if reader.read_line(&mut raw)? == 0 {
                break;
            }
            writeln!(transcript, "{}", raw.trim_end_matches(['\r', '\n']))?;
        }

        Ok(scan)
    }

    /// Check one header line for the pieces we keep.
    ///
    /// Only the first line is ever considered as a status line; every line
    /// is considered as a `Location` header, last match winning.
    fn inspect_header_line(&mut self, line: &str, first_line: bool) -> Result<(), FetchError> {
        if first_line && line.starts_with("HTTP/1.1") {
            self.status = Some(parse_status_line(line)?);
        }

        if line.to_lowercase().starts_with("location:") {
            if let Some(colon) = line.find(':') {
                let value = line[colon + 1..].trim().to_string();
                debug!(location = %value, "Captured Location header");
                self.redirect_location = Some(value);
            }
        }

        Ok(())
    }
}

/// Parse `HTTP/1.1 <code> <reason>` into its parts.
fn parse_status_line(line: &str) -> Result<StatusLine, FetchError> {
    let parts: Vec<&str> = line.splitn(3, ' ').collect();

    let code = parts
        .get(1)
        .and_then(|token| token.parse::<u16>().ok())
        .ok_or_else(|| FetchError::MalformedStatus {
            line: line.to_string(),
        })?;

    Ok(StatusLine {
        version: parts[0].to_string(),
        code,
        reason: parts.get(2).unwrap_or(&"").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scan_str(input: &str) -> (ResponseScan, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut transcript = Vec::new();
        let scan = ResponseScan::read_from(&mut reader, &mut transcript).unwrap();
        (scan, String::from_utf8(transcript).unwrap())
    }

    #[test]
    fn test_status_line_parsed() {
        let (scan, _) = scan_str("HTTP/1.1 200 OK\r\n\r\n");
        let status = scan.status.unwrap();
        assert_eq!(status.version, "HTTP/1.1");
        assert_eq!(status.code, 200);
        assert_eq!(status.reason, "OK");
    }

    #[test]
    fn test_multi_word_reason_phrase() {
        let (scan, _) = scan_str("HTTP/1.1 301 Moved Permanently\r\n\r\n");
        assert_eq!(scan.status.unwrap().reason, "Moved Permanently");
    }

    #[test]
    fn test_last_location_wins_case_insensitive() {
        let (scan, _) = scan_str(
            "HTTP/1.1 301 Moved Permanently\r\n\
             Location: /first\r\n\
             location: /second\r\n\
             LOCATION: /third\r\n\
             \r\n",
        );
        assert_eq!(scan.redirect_location.as_deref(), Some("/third"));
    }

    #[test]
    fn test_body_transcript_in_order() {
        let (_, transcript) = scan_str(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n<html>\r\n</html>\r\n",
        );
        assert_eq!(
            transcript,
            "HTTP/1.1 200 OK\nContent-Type: text/html\n\n<html>\n</html>\n"
        );
    }

    #[test]
    fn test_eof_before_blank_line_tolerated() {
        let (scan, transcript) = scan_str("HTTP/1.1 200 OK\r\n");
        assert_eq!(scan.status.unwrap().code, 200);
        assert!(scan.redirect_location.is_none());
        assert_eq!(transcript, "HTTP/1.1 200 OK\n");
    }

    #[test]
    fn test_unrecognized_first_line_keeps_status_unset() {
        let (scan, _) = scan_str("ICY 200 OK\r\n\r\n");
        assert!(scan.status.is_none());
    }

    #[test]
    fn test_status_only_checked_on_first_line() {
        let (scan, _) = scan_str("ICY 200 OK\r\nHTTP/1.1 404 Not Found\r\n\r\n");
        assert!(scan.status.is_none());
    }

    #[test]
    fn test_malformed_status_code_is_an_error() {
        let mut reader = Cursor::new(b"HTTP/1.1 ABC Bad\r\n\r\n".to_vec());
        let mut transcript = Vec::new();
        let err = ResponseScan::read_from(&mut reader, &mut transcript).unwrap_err();
        assert!(matches!(err, FetchError::MalformedStatus { .. }));
        // The offending line still reached the transcript first.
        assert_eq!(String::from_utf8(transcript).unwrap(), "HTTP/1.1 ABC Bad\n");
    }

    #[test]
    fn test_missing_status_code_token_is_an_error() {
        let mut reader = Cursor::new(b"HTTP/1.1\r\n\r\n".to_vec());
        let mut transcript = Vec::new();
        let err = ResponseScan::read_from(&mut reader, &mut transcript).unwrap_err();
        assert!(matches!(err, FetchError::MalformedStatus { .. }));
    }

    #[test]
    fn test_empty_location_value_still_captured() {
        let (scan, _) = scan_str("HTTP/1.1 302 Found\r\nLocation:\r\n\r\n");
        assert_eq!(scan.redirect_location.as_deref(), Some(""));
    }

    #[test]
    fn test_scan_is_repeatable() {
        let input = "HTTP/1.1 302 Found\r\nLocation: /next\r\n\r\n";
        let (first, _) = scan_str(input);
        let (second, _) = scan_str(input);
        assert_eq!(first, second);
    }
}
