use actix_web::{web, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use log::{info, warn};
use std::sync::Arc;

use ts_api::config::{Config, StoreBackend};
use ts_api::{create_app, AppSettings, AppState};
use ts_core::repositories::SessionStore;
use ts_core::services::clock::{Clock, SystemClock};
use ts_core::{AuthService, SessionRecorder, SessionRecorderConfig, TokenMinter, TokenServiceConfig};
use ts_infra::{InMemorySessionStore, RedisSessionStore, StaticCredentialVerifier};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().context("invalid configuration")?;
    config.validate().context("refusing to start")?;

    info!(
        "Starting TokenSession API ({} environment, {:?} session store)",
        config.environment, config.store_backend
    );
    if config.auth.jwt.is_using_default_secrets() {
        warn!("Using the default development signing secrets");
    }

    match config.store_backend {
        StoreBackend::Redis => {
            let store = RedisSessionStore::connect(config.cache.clone())
                .await
                .context("failed to connect to the session store")?;
            run(config, store).await
        }
        StoreBackend::Memory => {
            warn!("Sessions are kept in process memory and lost on restart");
            run(config, InMemorySessionStore::default()).await
        }
    }
}

async fn run<S>(config: Config, store: S) -> anyhow::Result<()>
where
    S: SessionStore + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());

    let token_config =
        TokenServiceConfig::try_from(&config.auth.jwt).context("invalid token configuration")?;
    let minter = TokenMinter::new(token_config, clock.clone()).context("invalid token configuration")?;
    let recorder = SessionRecorder::new(
        Arc::new(store),
        clock,
        SessionRecorderConfig {
            store_timeout: config.cache.operation_timeout(),
        },
    );
    let verifier = StaticCredentialVerifier::new(&config.auth.credentials);

    let auth_service = Arc::new(AuthService::new(Arc::new(verifier), Arc::new(minter), recorder));
    let app_state = web::Data::new(AppState::new(auth_service));
    let settings = AppSettings {
        environment: config.environment,
        max_payload_size: config.server.max_payload_size,
    };

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone(), settings));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
