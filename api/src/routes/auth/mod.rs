//! Authentication route handlers
//!
//! - `POST /api/v1/auth/login` (also `POST /login`)
//! - `GET /api/v1/auth/session`

pub mod login;
pub mod session;

use std::sync::Arc;

use ts_core::repositories::{IdentityVerifier, SessionStore};
use ts_core::services::auth::AuthService;

pub use login::login;
pub use session::session;

/// Application state that holds shared services
pub struct AppState<V, S>
where
    V: IdentityVerifier,
    S: SessionStore,
{
    pub auth_service: Arc<AuthService<V, S>>,
}

impl<V, S> AppState<V, S>
where
    V: IdentityVerifier,
    S: SessionStore,
{
    pub fn new(auth_service: Arc<AuthService<V, S>>) -> Self {
        Self { auth_service }
    }
}
