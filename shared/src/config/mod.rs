//! Configuration modules loaded from the process environment.
//!
//! Every struct has a `Default` carrying the documented defaults and a
//! `from_env()` constructor that overrides them field by field.

pub mod auth;
pub mod cache;
pub mod environment;
pub mod server;

pub use auth::{AuthConfig, CredentialsConfig, JwtConfig};
pub use cache::CacheConfig;
pub use environment::Environment;
pub use server::ServerConfig;

/// Reads an environment variable and parses it, falling back to `default`
/// when the variable is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
