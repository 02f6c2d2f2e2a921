//! Domain entities for identities and issued tokens.

pub mod identity;
pub mod token;

pub use identity::Identity;
pub use token::{AccessClaims, RefreshClaims, TokenKind, TokenPair};
