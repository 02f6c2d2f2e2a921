//! Redis-backed session store

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use ts_core::errors::DomainError;
use ts_core::repositories::SessionStore;

use super::{CacheConfig, RedisClient};

/// Stores one Redis key per issued token id, expiring with the token.
#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
    config: CacheConfig,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient, config: CacheConfig) -> Self {
        Self { client, config }
    }

    /// Connect using `config` and wrap the client
    pub async fn connect(config: CacheConfig) -> Result<Self, crate::InfrastructureError> {
        let client = RedisClient::new(&config).await?;
        Ok(Self::new(client, config))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let key = self.config.make_key(key);
        self.client.set_with_ttl(&key, value, ttl).await?;
        debug!(key = %key, "Session key written");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let key = self.config.make_key(key);
        Ok(self.client.get(&key).await?)
    }

    /// Whether the backing Redis answers `PING`
    async fn is_healthy(&self) -> bool {
        matches!(self.client.health_check().await, Ok(true))
    }
}
