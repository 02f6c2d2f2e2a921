//! Identity of an authenticated principal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An externally verified principal reference.
///
/// Identities are opaque to the core: they are produced by an
/// [`IdentityVerifier`](crate::repositories::IdentityVerifier), embedded in
/// both tokens as the `user_id` claim, and stored as the value of each
/// session record. On the wire they serialize as a bare JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identity {
    /// Numeric user id
    Numeric(u64),
    /// Any other principal reference
    Named(String),
}

impl Identity {
    /// Form written to the session store
    pub fn to_store_value(&self) -> String {
        self.to_string()
    }

    /// Parses a value read back from the session store.
    ///
    /// Values made only of digits come back as `Numeric`; compare identities
    /// through [`Identity::to_store_value`] when the variant matters.
    pub fn from_store_value(value: &str) -> Self {
        value
            .parse::<u64>()
            .map(Identity::Numeric)
            .unwrap_or_else(|_| Identity::Named(value.to_string()))
    }

    /// Whether two identities refer to the same stored principal
    pub fn same_principal(&self, other: &Identity) -> bool {
        self.to_store_value() == other.to_store_value()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Numeric(id) => write!(f, "{}", id),
            Identity::Named(name) => f.write_str(name),
        }
    }
}

impl From<u64> for Identity {
    fn from(id: u64) -> Self {
        Identity::Numeric(id)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Identity::from_store_value(value)
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Identity::from_store_value(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_identity_serializes_as_number() {
        let json = serde_json::to_value(Identity::Numeric(1)).unwrap();
        assert_eq!(json, serde_json::json!(1));

        let back: Identity = serde_json::from_value(json).unwrap();
        assert_eq!(back, Identity::Numeric(1));
    }

    #[test]
    fn test_named_identity_serializes_as_string() {
        let json = serde_json::to_value(Identity::Named("alice".into())).unwrap();
        assert_eq!(json, serde_json::json!("alice"));
    }

    #[test]
    fn test_store_value_parsing() {
        assert_eq!(Identity::from_store_value("42"), Identity::Numeric(42));
        assert_eq!(Identity::from_store_value("bob"), Identity::Named("bob".into()));
        assert_eq!(Identity::from("7"), Identity::Numeric(7));
    }

    #[test]
    fn test_same_principal_ignores_variant() {
        let named = Identity::Named("42".into());
        assert_ne!(named, Identity::Numeric(42));
        assert!(named.same_principal(&Identity::Numeric(42)));
        assert!(!named.same_principal(&Identity::Numeric(43)));
    }
}
