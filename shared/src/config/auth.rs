//! Authentication configuration: signing secrets, token lifetimes and the
//! configured login credential.

use serde::{Deserialize, Serialize};

use super::env_or;

/// Development-only access signing secret
pub const DEFAULT_ACCESS_SECRET: &str = "access_foo_bar";

/// Development-only refresh signing secret
pub const DEFAULT_REFRESH_SECRET: &str = "refresh_foo_bar";

/// Default access token lifetime (15 minutes)
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Default refresh token lifetime (7 days)
pub const DEFAULT_REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret used to sign access tokens
    pub access_secret: String,

    /// Secret used to sign refresh tokens. Must differ from `access_secret`.
    pub refresh_secret: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_secs: i64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_secs: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: DEFAULT_ACCESS_SECRET.to_string(),
            refresh_secret: DEFAULT_REFRESH_SECRET.to_string(),
            access_token_ttl_secs: default_access_ttl(),
            refresh_token_ttl_secs: default_refresh_ttl(),
        }
    }
}

impl JwtConfig {
    /// Create a configuration with explicit secrets and default lifetimes
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// Recognized: `ACCESS_SECRET`, `REFRESH_SECRET`, `ACCESS_TOKEN_TTL_SECS`,
    /// `REFRESH_TOKEN_TTL_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_secret: std::env::var("ACCESS_SECRET").unwrap_or(defaults.access_secret),
            refresh_secret: std::env::var("REFRESH_SECRET").unwrap_or(defaults.refresh_secret),
            access_token_ttl_secs: env_or("ACCESS_TOKEN_TTL_SECS", defaults.access_token_ttl_secs),
            refresh_token_ttl_secs: env_or("REFRESH_TOKEN_TTL_SECS", defaults.refresh_token_ttl_secs),
        }
    }

    /// Set access token lifetime in minutes
    pub fn with_access_ttl_minutes(mut self, minutes: i64) -> Self {
        self.access_token_ttl_secs = minutes.saturating_mul(60);
        self
    }

    /// Set refresh token lifetime in days
    pub fn with_refresh_ttl_days(mut self, days: i64) -> Self {
        self.refresh_token_ttl_secs = days.saturating_mul(86_400);
        self
    }

    /// Check if either development secret is still in use
    pub fn is_using_default_secrets(&self) -> bool {
        self.access_secret == DEFAULT_ACCESS_SECRET || self.refresh_secret == DEFAULT_REFRESH_SECRET
    }
}

/// The single credential accepted by the static identity verifier
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialsConfig {
    /// Identity issued on successful login (numeric or string)
    pub user_id: String,

    /// Expected username
    pub username: String,

    /// Expected password
    pub password: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            user_id: String::from("1"),
            username: String::from("jhondoe"),
            password: String::from("foobar"),
        }
    }
}

impl CredentialsConfig {
    /// Create from environment variables (`AUTH_USER_ID`, `AUTH_USERNAME`, `AUTH_PASSWORD`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            user_id: std::env::var("AUTH_USER_ID").unwrap_or(defaults.user_id),
            username: std::env::var("AUTH_USERNAME").unwrap_or(defaults.username),
            password: std::env::var("AUTH_PASSWORD").unwrap_or(defaults.password),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Login credential
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            credentials: CredentialsConfig::from_env(),
        }
    }
}

fn default_access_ttl() -> i64 {
    DEFAULT_ACCESS_TOKEN_TTL_SECS
}

fn default_refresh_ttl() -> i64 {
    DEFAULT_REFRESH_TOKEN_TTL_SECS
}
