//! Identity verification capability injected into the auth service.

use async_trait::async_trait;

use crate::domain::entities::identity::Identity;
use crate::errors::DomainError;

/// Checks a username/password pair and resolves the owning identity.
///
/// Implementations return [`DomainError::InvalidCredentials`] on any
/// mismatch without revealing which field was wrong.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> Result<Identity, DomainError>;
}
