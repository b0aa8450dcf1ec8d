//! Typed identifiers for settler types, colony types, and markers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed ID wrappers keep settler identities, colony identities and
/// markers from being mixed up. They are plain strings underneath: the
/// engine compares them and never looks inside.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new typed ID from anything that converts to String.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

typed_id!(SettlerId, "Identity of a settler type.");
typed_id!(ColonyId, "Identity of a colony type.");
typed_id!(
    Marker,
    "Opaque matching key: a capability carried by settlers, or the marker naming a strategy group."
);

impl SettlerId {
    /// Identity derived from a Rust type's name.
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>().to_owned())
    }
}

impl ColonyId {
    /// Identity derived from a Rust type's name.
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>().to_owned())
    }
}
