//! Application factory
//!
//! Builds the actix-web application around an already wired
//! [`AppState`]. Used by the binary and by the HTTP tests.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use ts_core::repositories::{IdentityVerifier, SessionStore};
use ts_shared::config::Environment;
use ts_shared::types::response::HealthStatus;

use crate::handlers::error_handler::json_error_handler;
use crate::middleware::cors::create_cors;
use crate::routes::auth::{login, session, AppState};

/// Per-process settings that shape the HTTP surface
#[derive(Debug, Clone, Copy)]
pub struct AppSettings {
    pub environment: Environment,
    /// Maximum accepted JSON body, in bytes
    pub max_payload_size: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            max_payload_size: 16 * 1024,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<V, S>(
    app_state: web::Data<AppState<V, S>>,
    settings: AppSettings,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    V: IdentityVerifier + 'static,
    S: SessionStore + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(settings.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(Logger::default())
        .wrap(create_cors(settings.environment))
        .route("/health", web::get().to(health_check::<V, S>))
        .route("/login", web::post().to(login::<V, S>))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/login", web::post().to(login::<V, S>))
                    .route("/session", web::get().to(session::<V, S>)),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// Reports `degraded` with 503 while the session store is unreachable.
async fn health_check<V, S>(state: web::Data<AppState<V, S>>) -> HttpResponse
where
    V: IdentityVerifier + 'static,
    S: SessionStore + 'static,
{
    let (status, mut response) = if state.auth_service.is_store_healthy().await {
        (HealthStatus::Healthy, HttpResponse::Ok())
    } else {
        log::warn!("Health check: session store unreachable");
        (HealthStatus::Degraded, HttpResponse::ServiceUnavailable())
    };

    response.json(serde_json::json!({
        "status": status,
        "service": "token-session-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
