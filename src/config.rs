//! Configuration module for the exporter.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::nodeping::DEFAULT_API_URL;

/// Configuration errors that prevent the exporter from starting.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("NODEPING_TOKEN should be specified")]
    MissingToken,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the metrics endpoint (default: 9503)
    pub http_port: u16,
    /// Base URL of the NodePing API
    pub api_url: String,
    /// NodePing API token
    pub token: String,
    /// Timeout applied to every upstream request (default: 30s)
    pub request_timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `NODEPING_TOKEN`: API token (required)
    /// - `NODEPING_API_URL`: API base URL (default: `https://api.nodeping.com/api/1`)
    /// - `NODEPING_EXPORTER_PORT`: HTTP port (default: 9503)
    /// - `NODEPING_REQUEST_TIMEOUT_SECS`: upstream request timeout (default: 30)
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("NODEPING_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let mut cfg = Self {
            http_port: 9503,
            api_url: DEFAULT_API_URL.to_string(),
            token,
            request_timeout: Duration::from_secs(30),
        };

        if let Some(api_url) = lookup("NODEPING_API_URL").filter(|u| !u.is_empty()) {
            cfg.api_url = api_url;
        }

        if let Some(port_str) = lookup("NODEPING_EXPORTER_PORT") {
            match port_str.parse() {
                Ok(port) => cfg.http_port = port,
                Err(_) => tracing::warn!(
                    "Ignoring invalid NODEPING_EXPORTER_PORT {:?}, using {}",
                    port_str,
                    cfg.http_port
                ),
            }
        }

        if let Some(secs_str) = lookup("NODEPING_REQUEST_TIMEOUT_SECS") {
            match secs_str.parse::<u64>() {
                Ok(secs) if secs > 0 => cfg.request_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(
                    "Ignoring invalid NODEPING_REQUEST_TIMEOUT_SECS {:?}, using {:?}",
                    secs_str,
                    cfg.request_timeout
                ),
            }
        }

        Ok(cfg)
    }
}
