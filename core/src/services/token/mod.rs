//! Token service module for JWT minting
//!
//! This module handles:
//! - HS256 signing of access and refresh tokens with separate secrets
//! - Per-issuance token identifiers and expiry instants
//! - Signature and expiry checks for tokens this service issued

mod config;
mod minter;


pub use config::TokenServiceConfig;
pub use minter::TokenMinter;
