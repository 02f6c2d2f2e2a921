//! Credential verification implementations

mod static_verifier;

pub use static_verifier::StaticCredentialVerifier;
