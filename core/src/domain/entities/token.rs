//! Token entities for the access/refresh token pair.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::Identity;

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Which half of a token pair a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Always `true` for access tokens
    pub authorized: bool,

    /// Per-issuance identifier, also the session store key
    #[serde(rename = "access_uuid")]
    pub access_id: Uuid,

    /// Owning identity
    #[serde(rename = "user_id")]
    pub identity: Identity,

    /// Expiration timestamp (unix seconds)
    pub exp: i64,
}

impl AccessClaims {
    /// Creates access claims expiring at `expires_at`
    pub fn new(access_id: Uuid, identity: Identity, expires_at: DateTime<Utc>) -> Self {
        Self {
            authorized: true,
            access_id,
            identity,
            exp: expires_at.timestamp(),
        }
    }

    /// Expiry as an instant, `None` when `exp` is out of range
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Checks if the claims have expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Claims carried by a refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Per-issuance identifier, also the session store key
    #[serde(rename = "refresh_uuid")]
    pub refresh_id: Uuid,

    /// Owning identity
    #[serde(rename = "user_id")]
    pub identity: Identity,

    /// Expiration timestamp (unix seconds)
    pub exp: i64,
}

impl RefreshClaims {
    /// Creates refresh claims expiring at `expires_at`
    pub fn new(refresh_id: Uuid, identity: Identity, expires_at: DateTime<Utc>) -> Self {
        Self {
            refresh_id,
            identity,
            exp: expires_at.timestamp(),
        }
    }

    /// Expiry as an instant, `None` when `exp` is out of range
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Checks if the claims have expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Result of minting: two signed tokens plus the metadata needed to record them.
///
/// Invariants: `access_expires_at < refresh_expires_at` and
/// `access_id != refresh_id`. Expiry instants carry whole seconds, exactly
/// as encoded in each token's `exp` claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,

    /// Access token identifier (store key)
    pub access_id: Uuid,

    /// Refresh token identifier (store key)
    pub refresh_id: Uuid,

    /// Access token expiry instant
    pub access_expires_at: DateTime<Utc>,

    /// Refresh token expiry instant
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// Identifier and expiry for one half of the pair
    pub fn session_of(&self, kind: TokenKind) -> (Uuid, DateTime<Utc>) {
        match kind {
            TokenKind::Access => (self.access_id, self.access_expires_at),
            TokenKind::Refresh => (self.refresh_id, self.refresh_expires_at),
        }
    }

    /// Seconds until the access token expires, measured from `now`
    pub fn access_expires_in(&self, now: DateTime<Utc>) -> i64 {
        (self.access_expires_at - now).num_seconds()
    }
}
