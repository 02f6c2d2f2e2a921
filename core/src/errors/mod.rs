//! Domain-specific error types and error handling.

mod types;

pub use types::TokenError;

use thiserror::Error;

/// Core domain errors
///
/// Credential and request-shape failures are user-facing. Everything raised
/// while minting or recording is a server-side failure and must be surfaced
/// opaquely by the presentation layer.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Malformed request: {message}")]
    MalformedRequest { message: String },

    #[error("Signing error: {message}")]
    Signing { message: String },

    #[error("Session store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Token {token_id} expired before it could be recorded")]
    ExpiredBeforeRecord { token_id: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Whether the caller may retry the same operation with backoff
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::StoreUnavailable { .. })
    }

    /// Whether the failure was caused by the request rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidCredentials
                | DomainError::MalformedRequest { .. }
                | DomainError::NotFound { .. }
                | DomainError::Token(_)
        )
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        DomainError::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn signing(message: impl Into<String>) -> Self {
        DomainError::Signing {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
