//! HTTP surface of TokenSession: login, session lookup and health.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppSettings};
pub use routes::auth::AppState;
