//! Runtime application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

use super::validation::validate_setting;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_LIMIT: usize = 100;

/// Runtime configuration for the local server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub server_port: u16,
    /// Entries returned by `/api/logs` when the request names no limit.
    pub log_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            server_port: DEFAULT_PORT,
            log_limit: DEFAULT_LOG_LIMIT,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Missing or invalid
    /// values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> Option<String> {
            let value = lookup(key)?.trim().to_string();
            if value.is_empty() {
                return None;
            }
            match validate_setting(key, &value) {
                Ok(()) => Some(value),
                Err(e) => {
                    tracing::warn!(key, value = %value, "Ignoring invalid setting: {e}");
                    None
                }
            }
        };

        Self {
            host: g("QR_STUDIO_HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            server_port: parse_or(g("QR_STUDIO_PORT"), DEFAULT_PORT),
            log_limit: parse_or(g("QR_STUDIO_LOG_LIMIT"), DEFAULT_LOG_LIMIT),
        }
    }

    /// Resolve host and port into a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, anyhow::Error> {
        if let Ok(ip) = self.host.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, self.server_port));
        }
        (self.host.as_str(), self.server_port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| anyhow::anyhow!("host '{}' did not resolve", self.host))
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
