//! Command line and environment configuration.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

/// Label Render API server
#[derive(Parser, Debug, Clone)]
#[command(name = "render-api")]
#[command(about = "Renders ZPL label markup to PNG images over HTTP")]
pub struct ServerConfig {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3009", env = "RENDER_API_LISTEN_ADDR")]
    pub listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Number of worker threads
    #[arg(long, env = "RENDER_API_WORKER_THREADS")]
    pub worker_threads: Option<usize>,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .with_context(|| format!("Invalid listen address: {}", self.listen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::parse_from(["render-api"]);
        assert_eq!(config.listen, "0.0.0.0:3009");
        assert_eq!(config.worker_threads, None);
        assert_eq!(config.listen_addr().unwrap().port(), 3009);
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = ServerConfig::parse_from([
            "render-api",
            "--listen",
            "127.0.0.1:8080",
            "--worker-threads",
            "2",
        ]);
        assert_eq!(config.listen_addr().unwrap().port(), 8080);
        assert_eq!(config.worker_threads, Some(2));
    }

    #[test]
    fn test_bad_listen_address() {
        let config = ServerConfig::parse_from(["render-api", "-l", "not-an-address"]);
        assert!(config.listen_addr().is_err());
    }
}
