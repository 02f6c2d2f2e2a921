//! Mock implementation of SessionStore for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::DomainError;
use crate::services::clock::Clock;

use super::store::SessionStore;

/// A single `set` call as seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub key: String,
    pub value: String,
    pub ttl: Duration,
}

/// Mock session store with clock-driven expiry and failure injection
pub struct MockSessionStore {
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, (String, DateTime<Utc>)>>,
    writes: Mutex<Vec<RecordedWrite>>,
    attempts: AtomicUsize,
    fail_on_attempt: Mutex<Option<usize>>,
    stall: AtomicBool,
}

impl MockSessionStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
            writes: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            fail_on_attempt: Mutex::new(None),
            stall: AtomicBool::new(false),
        }
    }

    /// Fail the `n`th `set` call (1-based) with `StoreUnavailable`
    pub fn fail_on_attempt(&self, n: usize) {
        *self.fail_on_attempt.lock().unwrap() = Some(n);
    }

    /// Make every subsequent `set` call hang forever
    pub fn stall_writes(&self) {
        self.stall.store(true, Ordering::SeqCst);
    }

    /// Number of `set` calls made, successful or not
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Successful writes in call order
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;

        if self.stall.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }

        if *self.fail_on_attempt.lock().unwrap() == Some(attempt) {
            return Err(DomainError::store_unavailable("simulated outage"));
        }

        let expires_at = self.clock.now()
            + chrono::Duration::from_std(ttl).expect("ttl fits in chrono::Duration");
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), expires_at));
        self.writes.lock().unwrap().push(RecordedWrite {
            key: key.to_string(),
            value: value.to_string(),
            ttl,
        });
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let now = self.clock.now();
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .get(key)
            .filter(|(_, expires_at)| now < *expires_at)
            .map(|(value, _)| value.clone()))
    }
}
