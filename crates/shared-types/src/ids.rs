//! # Identifiers
//!
//! Opaque, randomly generated identifiers for the entities of the
//! identity-access model.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID (e.g. one loaded from storage).
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// The underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
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
                self.0.fmt(f)
            }
        }
    };
}

entity_id!(
    /// Identity of the (single) registered user.
    UserId
);

entity_id!(
    /// Identity of the per-installation gatekeeper.
    GatekeeperId
);

entity_id!(
    /// Identity of an authenticated session.
    SessionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(UserId::new(), UserId::new());
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn test_id_roundtrips_through_uuid() {
        let id = GatekeeperId::new();
        assert_eq!(GatekeeperId::from_uuid(*id.as_uuid()), id);
    }

    #[test]
    fn test_display_is_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(SessionId::from_uuid(uuid).to_string(), uuid.to_string());
    }
}
