//! HTTP parsing module for jester-fetch.
//!
//! This module provides the line-oriented response scanner used by the
//! request executor. The scanner echoes the wire exchange to a transcript
//! sink while pulling out the pieces redirect handling needs.
//!
//! ## Author
//! a13x.h.cc@gmail.com

mod response;

pub use response::{ResponseScan, StatusLine};
