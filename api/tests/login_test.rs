//! HTTP tests for login and session lookup

use actix_web::http::{header, StatusCode};
use actix_web::{test, web};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use std::sync::Arc;

use ts_api::dto::auth::TokenResponse;
use ts_api::{create_app, AppSettings, AppState};
use ts_core::services::clock::ManualClock;
use ts_core::{AuthService, SessionRecorder, SessionRecorderConfig, TokenMinter, TokenServiceConfig};
use ts_infra::{InMemorySessionStore, StaticCredentialVerifier};

type TestState = AppState<StaticCredentialVerifier, InMemorySessionStore>;

struct TestContext {
    clock: ManualClock,
    store: InMemorySessionStore,
    state: web::Data<TestState>,
}

impl TestContext {
    fn new() -> Self {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap());
        let store = InMemorySessionStore::new(Arc::new(clock.clone()));

        let minter = TokenMinter::new(
            TokenServiceConfig::new("test-access-secret", "test-refresh-secret"),
            Arc::new(clock.clone()),
        )
        .unwrap();
        let recorder = SessionRecorder::new(
            Arc::new(store.clone()),
            Arc::new(clock.clone()),
            SessionRecorderConfig::default(),
        );
        let auth_service = AuthService::new(
            Arc::new(StaticCredentialVerifier::default()),
            Arc::new(minter),
            recorder,
        );

        Self {
            clock,
            store,
            state: web::Data::new(AppState::new(Arc::new(auth_service))),
        }
    }
}

fn login_request(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

fn valid_login() -> Value {
    json!({"username": "jhondoe", "password": "foobar"})
}

#[actix_web::test]
async fn test_login_issues_distinct_tokens_and_records_both() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), AppSettings::default())).await;

    let resp = test::call_service(&app, login_request("/api/v1/auth/login", valid_login()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: TokenResponse = test::read_body_json(resp).await;
    assert!(!body.access_token.is_empty());
    assert!(!body.refresh_token.is_empty());
    assert_ne!(body.access_token, body.refresh_token);

    assert_eq!(ctx.store.write_count(), 2);
    assert_eq!(ctx.store.live_keys().await.len(), 2);
}

#[actix_web::test]
async fn test_login_alias_route() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), AppSettings::default())).await;

    let resp = test::call_service(&app, login_request("/login", valid_login()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.store.write_count(), 2);
}

#[actix_web::test]
async fn test_wrong_password_is_unauthorized_without_writes() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), AppSettings::default())).await;

    let resp = test::call_service(
        &app,
        login_request("/api/v1/auth/login", json!({"username": "jhondoe", "password": "nope"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_credentials");
    assert_eq!(ctx.store.write_count(), 0);
}

#[actix_web::test]
async fn test_malformed_body_is_unprocessable_without_writes() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), AppSettings::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = test::call_service(&app, login_request("/api/v1/auth/login", json!({"user": "jhondoe"})).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = test::call_service(
        &app,
        login_request("/api/v1/auth/login", json!({"username": "", "password": "foobar"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(ctx.store.write_count(), 0);
}

#[actix_web::test]
async fn test_store_outage_is_opaque_and_retryable() {
    let ctx = TestContext::new();
    ctx.store.set_unavailable(true);
    let app = test::init_service(create_app(ctx.state.clone(), AppSettings::default())).await;

    let resp = test::call_service(&app, login_request("/api/v1/auth/login", valid_login()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "store_unavailable");
    assert_eq!(body["details"]["retryable"], true);
    assert!(body.get("access_token").is_none());

    let text = body.to_string();
    assert!(!text.contains("test-access-secret"));
    assert!(!text.contains("session store request failed"));
    assert_eq!(ctx.store.write_count(), 0);
}

#[actix_web::test]
async fn test_session_round_trip() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), AppSettings::default())).await;

    let resp = test::call_service(&app, login_request("/api/v1/auth/login", valid_login()).to_request()).await;
    let tokens: TokenResponse = test::read_body_json(resp).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", tokens.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], 1);
    let access_uuid = body["access_uuid"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(access_uuid).is_ok());
}

#[actix_web::test]
async fn test_session_rejects_refresh_token_and_missing_header() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), AppSettings::default())).await;

    let resp = test::call_service(&app, login_request("/api/v1/auth/login", valid_login()).to_request()).await;
    let tokens: TokenResponse = test::read_body_json(resp).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", tokens.refresh_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get().uri("/api/v1/auth/session").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "missing_token");
}

#[actix_web::test]
async fn test_session_expires_with_access_token() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), AppSettings::default())).await;

    let resp = test::call_service(&app, login_request("/api/v1/auth/login", valid_login()).to_request()).await;
    let tokens: TokenResponse = test::read_body_json(resp).await;

    ctx.clock.advance(Duration::minutes(15));

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", tokens.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "token_expired");
}

#[actix_web::test]
async fn test_concurrent_logins_record_four_keys() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), AppSettings::default())).await;

    let (first, second) = tokio::join!(
        test::call_service(&app, login_request("/api/v1/auth/login", valid_login()).to_request()),
        test::call_service(&app, login_request("/api/v1/auth/login", valid_login()).to_request()),
    );
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);

    assert_eq!(ctx.store.write_count(), 4);
    assert_eq!(ctx.store.live_keys().await.len(), 4);
}

#[actix_web::test]
async fn test_health_and_not_found() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), AppSettings::default())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_session_lookup_during_store_outage() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), AppSettings::default())).await;

    let resp = test::call_service(&app, login_request("/api/v1/auth/login", valid_login()).to_request()).await;
    let tokens: TokenResponse = test::read_body_json(resp).await;

    ctx.store.set_unavailable(true);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", tokens.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "store_unavailable");
    assert_eq!(body["details"]["retryable"], true);
    assert!(!body["message"].as_str().unwrap().to_lowercase().contains("login"));
}

#[actix_web::test]
async fn test_health_degraded_while_store_unreachable() {
    let ctx = TestContext::new();
    ctx.store.set_unavailable(true);
    let app = test::init_service(create_app(ctx.state.clone(), AppSettings::default())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
}
