use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use ts_shared::config::{AuthConfig, CacheConfig, Environment, ServerConfig};

/// Which session store the server runs against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Redis,
    /// Process-local store, lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::UnknownStoreBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ACCESS_SECRET and REFRESH_SECRET must be set in {0}")]
    DefaultSecrets(Environment),

    #[error("Unknown SESSION_STORE '{0}', expected 'redis' or 'memory'")]
    UnknownStoreBackend(String),

    #[error("The in-memory session store is not allowed in {0}")]
    MemoryStoreInProduction(Environment),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub auth: AuthConfig,
    pub cache: CacheConfig,
    pub server: ServerConfig,
    pub store_backend: StoreBackend,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_backend = match std::env::var("SESSION_STORE") {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => StoreBackend::default(),
        };

        Ok(Config {
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            server: ServerConfig::from_env(),
            store_backend,
            environment: Environment::from_env(),
        })
    }

    /// Reject settings that are only acceptable outside production
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_production() {
            return Ok(());
        }
        if self.auth.jwt.is_using_default_secrets() {
            return Err(ConfigError::DefaultSecrets(self.environment));
        }
        if self.store_backend == StoreBackend::Memory {
            return Err(ConfigError::MemoryStoreInProduction(self.environment));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}
