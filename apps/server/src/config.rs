//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use cafe_db::DbConfig;
use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: IpAddr,

    /// HTTP port
    pub http_port: u16,

    /// SQLite database file
    pub db_path: PathBuf,

    /// Connection pool size
    pub db_max_connections: u32,

    /// SQLite busy timeout in milliseconds
    pub db_busy_timeout_ms: u64,

    /// Idle session lifetime in seconds, 0 disables expiry
    pub session_ttl_secs: u64,

    /// Mark the session cookie `Secure` (only when served over HTTPS)
    pub cookie_secure: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            http_port: 5000,
            db_path: PathBuf::from("./cafe_stock.db"),
            db_max_connections: 5,
            db_busy_timeout_ms: 5_000,
            session_ttl_secs: 12 * 60 * 60,
            cookie_secure: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();

        let config = ServerConfig {
            bind_addr: parse_or(&lookup, "CAFE_BIND_ADDR", defaults.bind_addr)?,
            http_port: parse_or(&lookup, "CAFE_HTTP_PORT", defaults.http_port)?,
            db_path: lookup("CAFE_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            db_max_connections: parse_or(
                &lookup,
                "CAFE_DB_MAX_CONNECTIONS",
                defaults.db_max_connections,
            )?,
            db_busy_timeout_ms: parse_or(
                &lookup,
                "CAFE_DB_BUSY_TIMEOUT_MS",
                defaults.db_busy_timeout_ms,
            )?,
            session_ttl_secs: parse_or(&lookup, "CAFE_SESSION_TTL_SECS", defaults.session_ttl_secs)?,
            cookie_secure: parse_or(&lookup, "CAFE_COOKIE_SECURE", defaults.cookie_secure)?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("CAFE_DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Address the HTTP listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }

    /// Idle session lifetime, `None` when sessions never expire.
    pub fn session_ttl(&self) -> Option<Duration> {
        (self.session_ttl_secs > 0).then(|| Duration::from_secs(self.session_ttl_secs))
    }

    /// Pool configuration for the database file.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path)
            .max_connections(self.db_max_connections)
            .busy_timeout(Duration::from_millis(self.db_busy_timeout_ms))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        _ => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.db_path, PathBuf::from("./cafe_stock.db"));
        assert_eq!(config.session_ttl(), Some(Duration::from_secs(43_200)));
        assert_eq!(config.db_config().busy_timeout, Duration::from_secs(5));
        assert!(!config.cookie_secure);
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("CAFE_BIND_ADDR", "127.0.0.1"),
            ("CAFE_HTTP_PORT", "8080"),
            ("CAFE_DB_PATH", "/srv/cafe.db"),
            ("CAFE_DB_MAX_CONNECTIONS", "2"),
            ("CAFE_DB_BUSY_TIMEOUT_MS", "750"),
            ("CAFE_SESSION_TTL_SECS", "0"),
            ("CAFE_COOKIE_SECURE", "true"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.db_config().max_connections, 2);
        assert_eq!(config.db_config().busy_timeout, Duration::from_millis(750));
        assert_eq!(config.session_ttl(), None);
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_invalid_port() {
        let err = from_pairs(&[("CAFE_HTTP_PORT", "coffee")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for CAFE_HTTP_PORT");
    }

    #[test]
    fn test_zero_pool_rejected() {
        assert!(from_pairs(&[("CAFE_DB_MAX_CONNECTIONS", "0")]).is_err());
    }
}
