//! # TokenSession Core
//!
//! Core domain layer for dual-token login. Given a verified identity, the
//! [`TokenMinter`] issues a signed access/refresh token pair and the
//! [`SessionRecorder`] records both token identifiers in a key-value store
//! with TTLs matching each token's remaining validity.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{AccessClaims, Identity, RefreshClaims, TokenKind, TokenPair};
pub use errors::{DomainError, DomainResult, TokenError};
pub use repositories::{IdentityVerifier, SessionStore};
pub use services::{
    AuthService, Clock, ManualClock, SessionRecorder, SessionRecorderConfig, SystemClock,
    TokenMinter, TokenServiceConfig,
};
