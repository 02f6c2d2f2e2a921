use actix_web::{web, HttpResponse};
use validator::Validate;

use ts_core::errors::DomainError;
use ts_core::repositories::{IdentityVerifier, SessionStore};

use crate::dto::auth::{LoginRequest, TokenResponse};
use crate::handlers::error_handler::handle_domain_error;

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// # Request Body
///
/// ```json
/// {
///     "username": "jhondoe",
///     "password": "foobar"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Credentials do not match
/// - 422 Unprocessable Entity: Malformed body, or tokens could not be issued and recorded
pub async fn login<V, S>(
    state: web::Data<AppState<V, S>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    V: IdentityVerifier + 'static,
    S: SessionStore + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_domain_error(DomainError::MalformedRequest {
            message: format!("Invalid login request: {}", errors),
        });
    }

    match state.auth_service.login(&request.username, &request.password).await {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
