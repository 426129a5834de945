//! Identity types for catalog, planet and action rows

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create a new ID
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw ID value
            pub fn raw(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// Identifier of a player owning planets
    PlayerId,
    "player"
);
define_id!(
    /// Identifier of a planet
    PlanetId,
    "planet"
);
define_id!(
    /// Identifier of a catalog resource (metal, crystal, ...)
    ResourceId,
    "resource"
);
define_id!(
    /// Identifier of a catalog building
    BuildingId,
    "building"
);
define_id!(
    /// Identifier of a queued building action
    ActionId,
    "action"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planet_id() {
        let id = PlanetId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "planet:42");
    }

    #[test]
    fn test_ids_are_ordered() {
        assert!(ActionId::new(1) < ActionId::new(2));
        assert_eq!(ResourceId::from(7), ResourceId(7));
    }

    #[test]
    fn test_id_serializes_transparently() {
        let text = ron::to_string(&BuildingId::new(3)).unwrap();
        assert_eq!(text, "3");
    }
}
