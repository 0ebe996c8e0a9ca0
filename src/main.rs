//! # jester-fetch - A Minimal HTTP/1.1 Fetch Client
//!
//! jester-fetch issues a single GET request over a raw TCP connection,
//! echoes the full wire exchange to stdout as it arrives, and follows
//! 301/302 redirects.
//!
//! ## Features
//! - Hand-built HTTP/1.1 GET requests with `Connection: close`
//! - Line-oriented response scanning (status line, headers, body)
//! - Bounded redirect following (absolute and host-relative locations)
//! - TOML-based configuration for redirect and default-target tuning
//!
//! ## Author
//! a13x.h.cc@gmail.com

use std::env;
use std::io;
use std::path::Path;

mod client;
mod config;
mod error;
mod parsers;
mod redirect;
mod request;

use config::Config;

const CONFIG_FILE: &str = "jester-fetch.toml";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let host = match args.get(1) {
        Some(host) => host.clone(),
        None => {
            eprintln!(
                "Usage: {} <host> [port] [path]",
                args.first().map(String::as_str).unwrap_or("jester-fetch")
            );
            std::process::exit(2);
        }
    };

    // The settings file is optional; without it the built-in defaults apply.
    let config = if Path::new(CONFIG_FILE).exists() {
        println!("🔧 Loading configuration from: {}", CONFIG_FILE);
        match Config::from_file(CONFIG_FILE) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("❌ Failed to load config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    if let Err(e) = config.validate() {
        eprintln!("❌ Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    let settings = config.fetch;

    let port = match args.get(2) {
        Some(raw) => match raw.parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                eprintln!("❌ Invalid port: {}", raw);
                std::process::exit(2);
            }
        },
        None => settings.default_port,
    };
    let path = args
        .get(3)
        .cloned()
        .unwrap_or_else(|| settings.default_path.clone());

    println!("🃏 Fetching http://{}:{}{}", host, port, path);

    let mut stdout = io::stdout().lock();
    if let Err(e) = client::send_request(&host, port, &path, &settings, &mut stdout) {
        eprintln!("❌ Fetch failed: {}", e);
        std::process::exit(1);
    }
}
