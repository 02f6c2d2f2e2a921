//! Session store trait defining the key-value interface used for session bookkeeping.

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::DomainError;

/// Key-value store holding one record per issued token.
///
/// Keys are token identifiers, values are identities in their store form.
/// The store owns record lifetimes: every write carries a TTL after which
/// the key must no longer be readable.
///
/// Implementations report connectivity problems as
/// [`DomainError::StoreUnavailable`] and must not leak connection details
/// into the error message.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Write `value` under `key`, expiring after `ttl`
    ///
    /// # Arguments
    /// * `key` - Token identifier
    /// * `value` - Owning identity
    /// * `ttl` - Strictly positive time-to-live
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Read the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Key present and not expired
    /// * `Ok(None)` - Key missing or expired
    /// * `Err(DomainError)` - Store unreachable
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Whether the store currently answers requests
    async fn is_healthy(&self) -> bool {
        true
    }
}
