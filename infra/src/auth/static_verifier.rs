//! Verifier for a single configured username/password pair

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use tracing::debug;

use ts_core::domain::entities::identity::Identity;
use ts_core::errors::DomainError;
use ts_core::repositories::IdentityVerifier;
use ts_shared::config::CredentialsConfig;

/// Accepts exactly one configured credential and resolves it to a fixed identity.
///
/// Both fields are always compared, in constant time, so a mismatch on the
/// username costs the same as a mismatch on the password.
#[derive(Debug, Clone)]
pub struct StaticCredentialVerifier {
    identity: Identity,
    username: String,
    password: String,
}

impl StaticCredentialVerifier {
    pub fn new(config: &CredentialsConfig) -> Self {
        Self {
            identity: Identity::from_store_value(&config.user_id),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }
}

impl Default for StaticCredentialVerifier {
    fn default() -> Self {
        Self::new(&CredentialsConfig::default())
    }
}

#[async_trait]
impl IdentityVerifier for StaticCredentialVerifier {
    async fn verify(&self, username: &str, password: &str) -> Result<Identity, DomainError> {
        let username_ok = constant_time_eq(username.as_bytes(), self.username.as_bytes());
        let password_ok = constant_time_eq(password.as_bytes(), self.password.as_bytes());

        if username_ok & password_ok {
            Ok(self.identity.clone())
        } else {
            debug!("Credential mismatch");
            Err(DomainError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_credentials_resolve_to_user_one() {
        let verifier = StaticCredentialVerifier::default();
        let identity = verifier.verify("jhondoe", "foobar").await.unwrap();

        assert_eq!(identity, Identity::Numeric(1));
    }

    #[tokio::test]
    async fn test_mismatch_is_invalid_credentials() {
        let verifier = StaticCredentialVerifier::default();

        for (username, password) in [
            ("jhondoe", "wrong"),
            ("someone", "foobar"),
            ("", ""),
            ("JHONDOE", "foobar"),
        ] {
            let result = verifier.verify(username, password).await;
            assert!(matches!(result, Err(DomainError::InvalidCredentials)));
        }
    }

    #[tokio::test]
    async fn test_named_identity_from_config() {
        let config = CredentialsConfig {
            user_id: "svc-backup".to_string(),
            username: "backup".to_string(),
            password: "hunter2".to_string(),
        };
        let verifier = StaticCredentialVerifier::new(&config);

        let identity = verifier.verify("backup", "hunter2").await.unwrap();
        assert_eq!(identity, Identity::Named("svc-backup".to_string()));
    }
}
