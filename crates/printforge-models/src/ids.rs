//! Prefixed identifier newtypes.
//!
//! Every record type gets its own id newtype so a `MachineId` can never be
//! passed where a `QuoteId` is expected. Ids serialize as plain strings.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a new random id with the type's prefix.
            pub fn new() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::new_v4()))
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Identifier for a saved quote.
    QuoteId,
    "quote"
);
define_id!(
    /// Identifier for a production job.
    JobId,
    "job"
);
define_id!(
    /// Identifier for a material.
    MaterialId,
    "mat"
);
define_id!(
    /// Identifier for a machine.
    MachineId,
    "mach"
);
define_id!(
    /// Identifier for a cost constant or consumable.
    ConstantId,
    "const"
);
define_id!(
    /// Identifier for a customer.
    CustomerId,
    "cust"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_prefixes() {
        assert!(QuoteId::new().as_str().starts_with("quote-"));
        assert!(JobId::new().as_str().starts_with("job-"));
        assert!(MaterialId::new().as_str().starts_with("mat-"));
        assert!(MachineId::new().as_str().starts_with("mach-"));
        assert!(ConstantId::new().as_str().starts_with("const-"));
        assert!(CustomerId::new().as_str().starts_with("cust-"));
    }

    #[test]
    fn test_id_uniqueness() {
        assert_ne!(QuoteId::new(), QuoteId::new());
    }

    #[test]
    fn test_id_from_str_preserved() {
        let id = MaterialId::from("fdm-pla");
        assert_eq!(id.as_str(), "fdm-pla");
        assert_eq!(id.to_string(), "fdm-pla");
    }

    #[test]
    fn test_id_serialization_transparent() {
        let id = QuoteId::from("quote-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"quote-1\"");

        let back: QuoteId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
