//! Strongly typed identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Unlike index-based IDs, a
//! `PersonId` says nothing about storage position: transit and taxi drivers
//! carry person IDs too, but they are not members of the simulated
//! population.

use std::fmt;
use std::str::FromStr;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;
            fn from_str(s: &str) -> Result<$name, Self::Err> {
                s.trim().parse::<$inner>().map($name)
            }
        }
    };
}

typed_id! {
    /// Identifier of a simulated person (population member or not).
    pub struct PersonId(u32);
}

typed_id! {
    /// Identifier of a vehicle a person can enter and leave.
    pub struct VehicleId(u32);
}

impl VehicleId {
    /// The private vehicle conventionally owned by `person`.
    ///
    /// Plan replay has no vehicle fleet, so every person drives a vehicle
    /// that shares their numeric ID.
    #[inline]
    pub fn private_of(person: PersonId) -> VehicleId {
        VehicleId(person.0)
    }
}
