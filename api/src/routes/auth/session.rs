use actix_web::{http::header, web, HttpRequest, HttpResponse};

use ts_core::errors::TokenError;
use ts_core::repositories::{IdentityVerifier, SessionStore};

use crate::dto::auth::SessionResponse;
use crate::handlers::error_handler::handle_domain_error;

use super::AppState;

/// Handler for GET /api/v1/auth/session
///
/// Resolves the `Authorization: Bearer <access token>` header to the
/// recorded session.
///
/// ## Success (200 OK)
/// ```json
/// {
///     "user_id": 1,
///     "access_uuid": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid, expired or unrecorded token
pub async fn session<V, S>(req: HttpRequest, state: web::Data<AppState<V, S>>) -> HttpResponse
where
    V: IdentityVerifier + 'static,
    S: SessionStore + 'static,
{
    let token = match extract_bearer_token(&req) {
        Some(token) => token,
        None => return handle_domain_error(TokenError::MissingToken.into()),
    };

    match state.auth_service.authenticate(token).await {
        Ok(claims) => HttpResponse::Ok().json(SessionResponse::from(claims)),
        Err(error) => handle_domain_error(error),
    }
}

/// Extract the token from an `Authorization: Bearer` header
pub fn extract_bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
