//! Configuration structures for jester-fetch.
//!
//! This module provides the settings that tune redirect following and the
//! command line defaults. It handles TOML deserialization and validates the
//! loaded values before the client runs. Every field carries a default, so
//! a missing file or an empty table is a usable configuration.
//!
//! ## Author
//! a13x.h.cc@gmail.com

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchSettings,
}

/// Fetch client settings
///
/// # Example TOML
/// ```toml
/// [fetch]
/// max_redirects = 5
/// default_port = 80
/// default_path = "/"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Maximum number of redirect hops to follow before giving up
    pub max_redirects: usize,

    /// Port used when the command line names none
    pub default_port: u16,

    /// Path used when the command line names none
    pub default_path: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        FetchSettings {
            max_redirects: 5,
            default_port: 80,
            default_path: "/".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Check the loaded values before the client runs
    pub fn validate(&self) -> Result<(), String> {
        if self.fetch.max_redirects == 0 {
            return Err("max_redirects must be at least 1".to_string());
        }
        if !self.fetch.default_path.starts_with('/') {
            return Err(format!(
                "default_path must start with '/': {:?}",
                self.fetch.default_path
            ));
        }
        Ok(())
    }
}
