//! Token minter implementation

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{AccessClaims, RefreshClaims, TokenKind, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::services::clock::Clock;

use super::config::TokenServiceConfig;

/// Signing and verification keys for one half of the pair
struct KeySet {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeySet {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Mints signed access/refresh token pairs.
///
/// The minter holds no mutable state; a pair is a pure function of the
/// identity, the clock reading and the two secrets.
pub struct TokenMinter {
    config: TokenServiceConfig,
    access_keys: KeySet,
    refresh_keys: KeySet,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenMinter {
    /// Creates a new token minter
    ///
    /// # Arguments
    ///
    /// * `config` - Secrets and token lifetimes
    /// * `clock` - Time source for expiry instants
    ///
    /// # Returns
    ///
    /// A new `TokenMinter`, or `DomainError::Signing` when the configuration
    /// violates the signing policy (empty or shared secrets, bad lifetimes)
    pub fn new(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Result<Self, DomainError> {
        config.validate()?;

        // Expiry is checked against the injected clock, not the system time
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            access_keys: KeySet::from_secret(&config.access_secret),
            refresh_keys: KeySet::from_secret(&config.refresh_secret),
            config,
            validation,
            clock,
        })
    }

    /// Mints a new token pair for an identity
    ///
    /// Both tokens are signed before anything is returned; if either signing
    /// step fails the whole call fails with `DomainError::Signing`.
    pub fn mint(&self, identity: &Identity) -> Result<TokenPair, DomainError> {
        let now = self.clock.now();

        let access_id = Uuid::new_v4();
        let mut refresh_id = Uuid::new_v4();
        while refresh_id == access_id {
            refresh_id = Uuid::new_v4();
        }

        let access_expires_at = expiry_after(now, self.config.access_token_ttl)?;
        let refresh_expires_at = expiry_after(now, self.config.refresh_token_ttl)?;

        let access_claims = AccessClaims::new(access_id, identity.clone(), access_expires_at);
        let access_token = self.sign(&access_claims, &self.access_keys, TokenKind::Access)?;

        let refresh_claims = RefreshClaims::new(refresh_id, identity.clone(), refresh_expires_at);
        let refresh_token = self.sign(&refresh_claims, &self.refresh_keys, TokenKind::Refresh)?;

        debug!(
            user_id = %identity,
            access_id = %access_id,
            refresh_id = %refresh_id,
            "Minted token pair"
        );

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_id,
            refresh_id,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Verifies an access token against the access secret and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(AccessClaims)` - Signature valid and token not expired
    /// * `Err(TokenError)` - Wrong secret, expired, or malformed
    pub fn decode_access_token(&self, token: &str) -> Result<AccessClaims, DomainError> {
        let claims: AccessClaims = self.verify(token, &self.access_keys)?;
        if !claims.authorized {
            return Err(TokenError::InvalidClaims.into());
        }
        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::TokenExpired.into());
        }
        Ok(claims)
    }

    /// Verifies a refresh token against the refresh secret and returns its claims
    pub fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims, DomainError> {
        let claims: RefreshClaims = self.verify(token, &self.refresh_keys)?;
        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::TokenExpired.into());
        }
        Ok(claims)
    }

    fn sign<T: Serialize>(&self, claims: &T, keys: &KeySet, kind: TokenKind) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &keys.encoding).map_err(|e| {
            error!("Failed to sign {} token: {}", kind, e);
            DomainError::signing(format!("failed to sign {} token", kind))
        })
    }

    fn verify<T: DeserializeOwned>(&self, token: &str, keys: &KeySet) -> Result<T, DomainError> {
        decode::<T>(token, &keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let error = match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    _ => TokenError::InvalidTokenFormat,
                };
                DomainError::Token(error)
            })
    }
}

/// `now + ttl` truncated to whole seconds, matching the `exp` claim
fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, DomainError> {
    now.checked_add_signed(ttl)
        .and_then(|instant| Utc.timestamp_opt(instant.timestamp(), 0).single())
        .ok_or_else(|| DomainError::signing("token expiry out of range"))
}
