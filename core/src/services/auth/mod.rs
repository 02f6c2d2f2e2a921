//! Authentication service module
//!
//! Composes identity verification, token minting and session recording
//! into the login flow, and resolves recorded sessions for access tokens.

mod service;


pub use service::AuthService;
