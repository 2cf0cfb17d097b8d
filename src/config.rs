//! Server configuration from environment variables
//!
//! | Variable               | Default                  |
//! |------------------------|--------------------------|
//! | `PORT`                 | 3000                     |
//! | `UPSTREAM_BASE_URL`    | https://www.boatrace.jp  |
//! | `REQUEST_TIMEOUT_SECS` | 10                       |
//! | `CACHE_TTL_SECS`       | 300                      |
//! | `CACHE_CAPACITY`       | 10000                    |
//! | `FETCH_BATCH_SIZE`     | 20                       |
//!
//! Unparseable values fall back to the default.

use std::time::Duration;

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://www.boatrace.jp";
pub const DEFAULT_FETCH_BATCH_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    /// No trailing slash
    pub upstream_base_url: String,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_capacity: u64,
    pub fetch_batch_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(300),
            cache_capacity: 10_000,
            fetch_batch_size: DEFAULT_FETCH_BATCH_SIZE,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests use a map)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        let upstream_base_url = lookup("UPSTREAM_BASE_URL")
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or(defaults.upstream_base_url);

        Self {
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            upstream_base_url,
            request_timeout: parsed("REQUEST_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            cache_ttl: parsed("CACHE_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            cache_capacity: parsed("CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            // zero would make chunking panic
            fetch_batch_size: parsed("FETCH_BATCH_SIZE")
                .and_then(|n| usize::try_from(n).ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.fetch_batch_size),
        }
    }

    pub fn log_summary(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  PORT: {}", self.port);
        tracing::info!("  UPSTREAM_BASE_URL: {}", self.upstream_base_url);
        tracing::info!("  REQUEST_TIMEOUT_SECS: {}", self.request_timeout.as_secs());
        tracing::info!("  CACHE_TTL_SECS: {}", self.cache_ttl.as_secs());
        tracing::info!("  CACHE_CAPACITY: {}", self.cache_capacity);
        tracing::info!("  FETCH_BATCH_SIZE: {}", self.fetch_batch_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("UPSTREAM_BASE_URL", "http://localhost:9000/"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("CACHE_TTL_SECS", "60"),
            ("CACHE_CAPACITY", "500"),
            ("FETCH_BATCH_SIZE", "5"),
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream_base_url, "http://localhost:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.cache_capacity, 500);
        assert_eq!(config.fetch_batch_size, 5);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("FETCH_BATCH_SIZE", "0")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.fetch_batch_size, DEFAULT_FETCH_BATCH_SIZE);
    }
}
