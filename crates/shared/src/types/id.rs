//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `LotId` where an `OwnerId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(OwnerId, "Unique identifier for an owner (also used as voter id).");
typed_id!(LotId, "Unique identifier for a lot.");
typed_id!(BudgetItemId, "Unique identifier for a budget line item.");
typed_id!(BankAccountId, "Unique identifier for a bank account.");
typed_id!(OperationId, "Unique identifier for a bank operation.");
typed_id!(ResolutionId, "Unique identifier for an assembly resolution.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = OwnerId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
    }

    #[test]
    fn test_typed_id_display_and_parse() {
        let uuid = Uuid::new_v4();
        let id = LotId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
        assert_eq!(LotId::from_str(&uuid.to_string()).unwrap(), id);
    }

    #[test]
    fn test_typed_id_from_str_error() {
        assert!(ResolutionId::from_str("invalid").is_err());
    }

    #[test]
    fn test_typed_id_is_transparent_in_json() {
        let uuid = Uuid::new_v4();
        let id = OwnerId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }

    #[test]
    fn test_typed_id_as_json_map_key() {
        let mut map = BTreeMap::new();
        map.insert(OwnerId::new(), 1u32);
        let json = serde_json::to_string(&map).unwrap();
        let back: BTreeMap<OwnerId, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
