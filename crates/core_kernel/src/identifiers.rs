//! Strongly-typed identifiers for domain entities
//!
//! Claims, customers, and policies carry externally-issued string identifiers
//! (e.g. "CLM-2024-0001"), while queue entries, history rows, and users use
//! database-assigned integer keys. Newtype wrappers keep the two families
//! from being mixed up at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from an externally-issued string
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the identifier is empty
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

macro_rules! define_int_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a database-assigned key
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the underlying key
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

// Externally-issued string identifiers
define_string_id!(ClaimId);
define_string_id!(CustomerId);
define_string_id!(PolicyId);

// Database-assigned integer keys
define_int_id!(QueueId);
define_int_id!(HistoryId);
define_int_id!(UserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_display() {
        let id = ClaimId::new("CLM-2024-0001");
        assert_eq!(id.to_string(), "CLM-2024-0001");
        assert_eq!(id.as_str(), "CLM-2024-0001");
    }

    #[test]
    fn test_claim_id_serde_transparent() {
        let id = ClaimId::new("CLM-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"CLM-1\"");

        let back: ClaimId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_queue_id_roundtrip() {
        let id = QueueId::new(42);
        assert_eq!(id.value(), 42);
        let raw: i64 = id.into();
        assert_eq!(QueueId::from(raw), id);
    }

    #[test]
    fn test_empty_claim_id() {
        assert!(ClaimId::new("").is_empty());
        assert!(!ClaimId::new("CLM-1").is_empty());
    }
}
