use serde::{Deserialize, Serialize};
use validator::Validate;

use ts_core::{AccessClaims, Identity, TokenPair};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 256))]
    pub username: String,

    #[validate(length(min = 1, max = 1024))]
    pub password: String,
}

/// Body of a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: Identity,
    pub access_uuid: String,
}

impl From<AccessClaims> for SessionResponse {
    fn from(claims: AccessClaims) -> Self {
        Self {
            user_id: claims.identity,
            access_uuid: claims.access_id.to_string(),
        }
    }
}
