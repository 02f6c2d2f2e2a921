//! Session store (Redis) configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::env_or;

/// Default Redis endpoint when no DSN is configured
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Redis session store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Upper bound for a single store read or write, in milliseconds
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,

    /// Maximum attempts for connection-level failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between attempts (doubled each time, capped at 5s)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Optional prefix applied to every session key
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_REDIS_URL),
            connection_timeout: default_connection_timeout(),
            operation_timeout_ms: default_operation_timeout_ms(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    ///
    /// The address is read from `REDIS_DSN`, then `REDIS_URL`. A bare
    /// `host:port` value is accepted.
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_DSN")
            .or_else(|_| std::env::var("REDIS_URL"))
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| normalize_redis_url(&value))
            .unwrap_or_else(|| DEFAULT_REDIS_URL.to_string());

        let defaults = Self::default();
        Self {
            url,
            connection_timeout: env_or("REDIS_CONNECTION_TIMEOUT", defaults.connection_timeout),
            operation_timeout_ms: env_or("STORE_WRITE_TIMEOUT_MS", defaults.operation_timeout_ms),
            max_retries: env_or("REDIS_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("REDIS_RETRY_DELAY_MS", defaults.retry_delay_ms),
            key_prefix: std::env::var("SESSION_KEY_PREFIX")
                .ok()
                .filter(|prefix| !prefix.is_empty()),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: normalize_redis_url(&url.into()),
            ..Default::default()
        }
    }

    /// Set the key prefix for all session keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Connection timeout as a `Duration`
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout)
    }

    /// Per-operation timeout as a `Duration`
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

/// Accepts both `redis://host:port` URLs and bare `host:port` DSNs.
pub fn normalize_redis_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.contains("://") {
        raw.to_string()
    } else {
        format!("redis://{}", raw)
    }
}

fn default_connection_timeout() -> u64 {
    5
}

fn default_operation_timeout_ms() -> u64 {
    2000
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}
