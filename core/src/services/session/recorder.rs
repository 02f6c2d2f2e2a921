//! Session recorder implementation

use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{TokenKind, TokenPair};
use crate::errors::DomainError;
use crate::repositories::SessionStore;
use crate::services::clock::Clock;

/// Default upper bound for a single store operation
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(2);

/// Configuration for the session recorder
#[derive(Debug, Clone)]
pub struct SessionRecorderConfig {
    /// Upper bound for a single store read or write
    pub store_timeout: Duration,
}

impl Default for SessionRecorderConfig {
    fn default() -> Self {
        Self {
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

/// Records each issued token identifier in the session store.
///
/// Writes are fail-fast and not atomic: the access record is written first,
/// and if the refresh write then fails the access record stays behind until
/// its TTL expires.
pub struct SessionRecorder<S: SessionStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: SessionRecorderConfig,
}

impl<S: SessionStore> SessionRecorder<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, config: SessionRecorderConfig) -> Self {
        Self { store, clock, config }
    }

    /// Store health, bounded by the store timeout
    pub async fn is_store_healthy(&self) -> bool {
        timeout(self.config.store_timeout, self.store.is_healthy())
            .await
            .unwrap_or(false)
    }

    /// Records both halves of a token pair for `identity`
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Both records written
    /// * `Err(DomainError::ExpiredBeforeRecord)` - A token expired before its write
    /// * `Err(DomainError::StoreUnavailable)` - Store failed or timed out
    pub async fn record(&self, identity: &Identity, pair: &TokenPair) -> Result<(), DomainError> {
        let value = identity.to_store_value();

        self.write(TokenKind::Access, pair, &value).await?;

        if let Err(e) = self.write(TokenKind::Refresh, pair, &value).await {
            warn!(
                user_id = %identity,
                access_id = %pair.access_id,
                "Refresh session write failed after access session was recorded: {}",
                e
            );
            return Err(e);
        }

        info!(
            user_id = %identity,
            access_id = %pair.access_id,
            refresh_id = %pair.refresh_id,
            "Session recorded"
        );
        Ok(())
    }

    /// Like [`record`](Self::record), but gives up with `DomainError::Cancelled`
    /// as soon as `cancel` completes.
    pub async fn record_until<F>(
        &self,
        identity: &Identity,
        pair: &TokenPair,
        cancel: F,
    ) -> Result<(), DomainError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.record(identity, pair) => result,
            _ = cancel => {
                warn!(access_id = %pair.access_id, "Session recording cancelled by caller");
                Err(DomainError::Cancelled)
            }
        }
    }

    /// Resolves the identity recorded for a token identifier
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - Record present
    /// * `Err(DomainError::NotFound)` - Never recorded or TTL elapsed
    /// * `Err(DomainError::StoreUnavailable)` - Store failed or timed out
    pub async fn lookup(&self, token_id: &Uuid) -> Result<Identity, DomainError> {
        let key = token_id.to_string();

        let value = match timeout(self.config.store_timeout, self.store.get(&key)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(DomainError::store_unavailable(format!(
                    "session lookup timed out after {:?}",
                    self.config.store_timeout
                )))
            }
        };

        match value {
            Some(value) => Ok(Identity::from_store_value(&value)),
            None => {
                debug!(token_id = %token_id, "Session not found");
                Err(DomainError::NotFound {
                    resource: format!("session {}", token_id),
                })
            }
        }
    }

    async fn write(&self, kind: TokenKind, pair: &TokenPair, value: &str) -> Result<(), DomainError> {
        let (token_id, expires_at) = pair.session_of(kind);
        // TTL is measured at write time, not at mint time
        let ttl = self.remaining_ttl(token_id, expires_at)?;
        let key = token_id.to_string();

        debug!(token_id = %token_id, ttl_ms = ttl.as_millis() as u64, "Writing {} session", kind);

        match timeout(self.config.store_timeout, self.store.set(&key, value, ttl)).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::store_unavailable(format!(
                "{} session write timed out after {:?}",
                kind, self.config.store_timeout
            ))),
        }
    }

    fn remaining_ttl(&self, token_id: Uuid, expires_at: DateTime<Utc>) -> Result<Duration, DomainError> {
        let remaining = expires_at - self.clock.now();
        // Stores expire keys with millisecond precision
        if remaining < chrono::Duration::milliseconds(1) {
            warn!(token_id = %token_id, "Token expired before it could be recorded");
            return Err(DomainError::ExpiredBeforeRecord {
                token_id: token_id.to_string(),
            });
        }
        remaining.to_std().map_err(|_| DomainError::ExpiredBeforeRecord {
            token_id: token_id.to_string(),
        })
    }
}
