pub mod identity;
pub mod session;

pub use identity::IdentityVerifier;
pub use session::SessionStore;

#[cfg(test)]
pub use session::MockSessionStore;
