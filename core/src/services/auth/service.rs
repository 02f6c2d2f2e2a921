//! Main authentication service implementation

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{AccessClaims, TokenPair};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::{IdentityVerifier, SessionStore};
use crate::services::session::SessionRecorder;
use crate::services::token::TokenMinter;

/// Authentication service for the login flow
pub struct AuthService<V, S>
where
    V: IdentityVerifier,
    S: SessionStore,
{
    /// Credential check
    verifier: Arc<V>,
    /// Token pair issuance
    minter: Arc<TokenMinter>,
    /// Session bookkeeping
    recorder: SessionRecorder<S>,
}

impl<V, S> AuthService<V, S>
where
    V: IdentityVerifier,
    S: SessionStore,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `verifier` - Resolves credentials to an identity
    /// * `minter` - Signs access/refresh token pairs
    /// * `recorder` - Records issued tokens in the session store
    pub fn new(verifier: Arc<V>, minter: Arc<TokenMinter>, recorder: SessionRecorder<S>) -> Self {
        Self {
            verifier,
            minter,
            recorder,
        }
    }

    pub fn minter(&self) -> &TokenMinter {
        &self.minter
    }

    /// Whether the session store is reachable
    pub async fn is_store_healthy(&self) -> bool {
        self.recorder.is_store_healthy().await
    }

    /// Authenticate a username/password pair and issue a recorded token pair
    ///
    /// This method:
    /// 1. Rejects blank usernames or passwords
    /// 2. Resolves the identity through the injected verifier
    /// 3. Mints the access/refresh pair
    /// 4. Records both token identifiers in the session store
    ///
    /// Nothing is minted or written when steps 1 or 2 fail.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Tokens issued and recorded
    /// * `Err(DomainError::MalformedRequest)` - Blank field
    /// * `Err(DomainError::InvalidCredentials)` - Credential mismatch
    /// * `Err(DomainError)` - Signing or store failure
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<TokenPair> {
        if username.trim().is_empty() {
            return Err(DomainError::MalformedRequest {
                message: "username is required".to_string(),
            });
        }
        if password.is_empty() {
            return Err(DomainError::MalformedRequest {
                message: "password is required".to_string(),
            });
        }

        let identity = match self.verifier.verify(username, password).await {
            Ok(identity) => identity,
            Err(e) => {
                warn!("Login rejected: {}", e);
                return Err(e);
            }
        };

        let pair = self.minter.mint(&identity)?;
        self.recorder.record(&identity, &pair).await?;

        info!(user_id = %identity, access_id = %pair.access_id, "Login succeeded");
        Ok(pair)
    }

    /// Resolve a presented access token to its recorded session
    ///
    /// The token must carry a valid access signature, be unexpired, and its
    /// `access_uuid` must still be recorded for the same identity.
    pub async fn authenticate(&self, access_token: &str) -> DomainResult<AccessClaims> {
        let claims = self.minter.decode_access_token(access_token)?;
        let recorded = self.recorder.lookup(&claims.access_id).await?;

        if !recorded.same_principal(&claims.identity) {
            warn!(
                access_id = %claims.access_id,
                "Recorded session identity does not match token claims"
            );
            return Err(TokenError::InvalidClaims.into());
        }

        debug!(user_id = %claims.identity, access_id = %claims.access_id, "Session resolved");
        Ok(claims)
    }

    /// Resolve a token identifier directly against the session store
    pub async fn session_owner(&self, token_id: &uuid::Uuid) -> DomainResult<Identity> {
        self.recorder.lookup(token_id).await
    }
}
