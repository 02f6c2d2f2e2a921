//! In-process session store
//!
//! Same contract as the Redis store, with expiry driven by an injected
//! [`Clock`]. Used by tests and by local runs without Redis.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use ts_core::errors::DomainError;
use ts_core::repositories::SessionStore;
use ts_core::services::clock::{Clock, SystemClock};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Thread-safe in-memory session store
///
/// Clones share the same underlying map.
#[derive(Clone)]
pub struct InMemorySessionStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    clock: Arc<dyn Clock>,
    unavailable: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl InMemorySessionStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
            unavailable: Arc::new(AtomicBool::new(false)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Simulate an outage: every operation fails with `StoreUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of successful writes since creation
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Keys currently readable
    pub async fn live_keys(&self) -> Vec<String> {
        let now = self.clock.now();
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|(_, entry)| entry.expires_at > now)
            .map(|(key, _)| key.clone())
            .collect()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::store_unavailable("session store request failed"));
        }
        Ok(())
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock::new()))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        self.check_available()?;

        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|_| DomainError::store_unavailable("TTL out of range"))?;
        if ttl <= chrono::Duration::zero() {
            return Err(DomainError::store_unavailable("TTL must be positive"));
        }

        let entry = Entry {
            value: value.to_string(),
            expires_at: self.clock.now() + ttl,
        };

        let mut entries = self.entries.write().await;
        let now = self.clock.now();
        entries.retain(|_, existing| existing.expires_at > now);
        entries.insert(key.to_string(), entry);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.check_available()?;

        let entries = self.entries.read().await;
        let now = self.clock.now();
        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone()))
    }

    async fn is_healthy(&self) -> bool {
        !self.unavailable.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ts_core::services::clock::ManualClock;

    fn store() -> (ManualClock, InMemorySessionStore) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap());
        let store = InMemorySessionStore::new(Arc::new(clock.clone()));
        (clock, store)
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let (_, store) = store();
        store.set("k", "1", Duration::from_secs(60)).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some("1".to_string()));
        assert_eq!(store.get("missing").await.unwrap(), None);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_entry_expires_with_clock() {
        let (clock, store) = store();
        store.set("k", "1", Duration::from_secs(60)).await.unwrap();

        clock.advance(chrono::Duration::seconds(59));
        assert!(store.get("k").await.unwrap().is_some());

        clock.advance(chrono::Duration::seconds(1));
        assert!(store.get("k").await.unwrap().is_none());
        assert!(store.live_keys().await.is_empty());
    }

    #[tokio::test]
    async fn test_zero_ttl_rejected() {
        let (_, store) = store();
        let result = store.set("k", "1", Duration::ZERO).await;

        assert!(matches!(result, Err(DomainError::StoreUnavailable { .. })));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_outage_fails_every_operation() {
        let (_, store) = store();
        store.set_unavailable(true);

        assert!(store.set("k", "1", Duration::from_secs(1)).await.is_err());
        assert!(store.get("k").await.is_err());
        assert!(!store.is_healthy().await);

        store.set_unavailable(false);
        assert!(store.set("k", "1", Duration::from_secs(1)).await.is_ok());
        assert!(store.is_healthy().await);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let (_, store) = store();
        let other = store.clone();
        store.set("k", "alice", Duration::from_secs(5)).await.unwrap();

        assert_eq!(other.get("k").await.unwrap(), Some("alice".to_string()));
    }
}
