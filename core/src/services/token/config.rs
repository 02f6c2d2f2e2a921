//! Configuration for the token minter

use chrono::Duration;
use ts_shared::config::JwtConfig;

use crate::domain::entities::token::{ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS};
use crate::errors::DomainError;

/// Configuration for the token minter
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret signing access tokens
    pub access_secret: String,
    /// Secret signing refresh tokens
    pub refresh_secret: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_secret: ts_shared::config::auth::DEFAULT_ACCESS_SECRET.to_string(),
            refresh_secret: ts_shared::config::auth::DEFAULT_REFRESH_SECRET.to_string(),
            access_token_ttl: Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
            refresh_token_ttl: Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
        }
    }
}

impl TokenServiceConfig {
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    pub fn with_ttls(mut self, access: Duration, refresh: Duration) -> Self {
        self.access_token_ttl = access;
        self.refresh_token_ttl = refresh;
        self
    }

    /// Checks the signing policy: both secrets set and distinct, lifetimes in
    /// whole seconds, access strictly shorter than refresh.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.access_secret.is_empty() || self.refresh_secret.is_empty() {
            return Err(DomainError::signing("signing secret is empty"));
        }
        if self.access_secret == self.refresh_secret {
            return Err(DomainError::signing(
                "access and refresh signing secrets must differ",
            ));
        }
        if self.access_token_ttl < Duration::seconds(1) {
            return Err(DomainError::signing("access token lifetime must be at least one second"));
        }
        if self.access_token_ttl >= self.refresh_token_ttl {
            return Err(DomainError::signing(
                "access token lifetime must be shorter than refresh token lifetime",
            ));
        }
        if self.access_token_ttl.subsec_nanos() != 0 || self.refresh_token_ttl.subsec_nanos() != 0 {
            return Err(DomainError::signing("token lifetimes must be whole seconds"));
        }
        Ok(())
    }
}

impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = DomainError;

    /// Fails with `DomainError::Signing` when a lifetime does not fit a `Duration`
    fn try_from(jwt: &JwtConfig) -> Result<Self, Self::Error> {
        let lifetime = |name: &str, secs: i64| {
            Duration::try_seconds(secs)
                .ok_or_else(|| DomainError::signing(format!("{} is out of range", name)))
        };

        Ok(Self {
            access_secret: jwt.access_secret.clone(),
            refresh_secret: jwt.refresh_secret.clone(),
            access_token_ttl: lifetime("access token lifetime", jwt.access_token_ttl_secs)?,
            refresh_token_ttl: lifetime("refresh token lifetime", jwt.refresh_token_ttl_secs)?,
        })
    }
}
