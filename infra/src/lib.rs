//! # Infrastructure Layer
//!
//! Concrete implementations of the ports declared in `ts_core`:
//!
//! - **Cache**: Redis-backed [`SessionStore`](ts_core::SessionStore) plus an
//!   in-process store for tests and local runs
//! - **Auth**: the configured static credential check behind
//!   [`IdentityVerifier`](ts_core::IdentityVerifier)

pub use ts_core::errors::*;

/// Cache module - Redis client and session stores
pub mod cache;

/// Credential verification implementations
pub mod auth;

pub use auth::StaticCredentialVerifier;
pub use cache::{InMemorySessionStore, RedisClient, RedisSessionStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Operation did not complete in time
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        // Connection details stay in the logs
        tracing::error!("Session store failure: {}", error);
        DomainError::store_unavailable("session store request failed")
    }
}
