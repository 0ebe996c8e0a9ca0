//! Configuration module for jester-fetch.
//!
//! This module handles loading the optional TOML configuration file that
//! tunes redirect following and the command line defaults.
//!
//! ## Author
//! a13x.h.cc@gmail.com

mod config;

pub use config::{Config, FetchSettings};
