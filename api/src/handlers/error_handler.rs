//! Conversion of domain failures into HTTP responses
//!
//! Client mistakes get a specific status. Server-side failures are reported
//! as 422 with a fixed message so that no signing or store detail reaches
//! the caller.

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};

use ts_core::errors::{DomainError, TokenError};

use crate::dto::{ErrorResponse, ErrorResponseExt};

const LOGIN_FAILED_MESSAGE: &str = "Unable to complete login, please try again";
const STORE_UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable, please try again";

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    if error.is_client_error() {
        log::info!("Request rejected: {}", error);
    } else {
        log::error!("Request failed: {}", error);
    }

    match error {
        DomainError::InvalidCredentials => ErrorResponse::new(
            "invalid_credentials",
            "Please provide valid login details",
        )
        .to_response(StatusCode::UNAUTHORIZED),

        DomainError::MalformedRequest { message } => ErrorResponse::new("invalid_request", message)
            .to_response(StatusCode::UNPROCESSABLE_ENTITY),

        DomainError::Token(token_error) => handle_token_error(token_error),

        DomainError::NotFound { .. } => ErrorResponse::new("session_not_found", "Session expired or revoked")
            .to_response(StatusCode::UNAUTHORIZED),

        DomainError::StoreUnavailable { .. } => ErrorResponse::new("store_unavailable", STORE_UNAVAILABLE_MESSAGE)
            .add_detail("retryable", true)
            .to_response(StatusCode::UNPROCESSABLE_ENTITY),

        DomainError::Signing { .. } | DomainError::ExpiredBeforeRecord { .. } | DomainError::Cancelled => {
            ErrorResponse::new("login_failed", LOGIN_FAILED_MESSAGE)
                .to_response(StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}

fn handle_token_error(error: TokenError) -> HttpResponse {
    let (code, message) = match error {
        TokenError::TokenExpired => ("token_expired", "Access token has expired"),
        TokenError::MissingToken => ("missing_token", "Authorization header is required"),
        TokenError::InvalidTokenFormat
        | TokenError::InvalidSignature
        | TokenError::InvalidClaims => ("invalid_token", "Access token is invalid"),
    };

    ErrorResponse::new(code, message).to_response(StatusCode::UNAUTHORIZED)
}

/// Rejects bodies that are not valid JSON for the target type with 422
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::info!("Malformed JSON body: {}", error);

    let response = ErrorResponse::new("invalid_request", "Request body must be a JSON object with username and password")
        .to_response(StatusCode::UNPROCESSABLE_ENTITY);

    actix_web::error::InternalError::from_response(error, response).into()
}
