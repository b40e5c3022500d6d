//! Travel mode enum shared by plans, events, scoring parameters, and the
//! parking handler.
//!
//! The string form (`as_str`) is what appears in plan files, configuration
//! and money-event purpose strings, so it must stay stable.

use std::str::FromStr;

use crate::CoreError;

/// The mode a person uses for one leg.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[non_exhaustive]
pub enum TransportMode {
    /// Private car, driven by the person.
    Car,
    /// Passenger in someone else's car.
    Ride,
    /// Scheduled public transit.
    Pt,
    /// On foot.
    Walk,
    /// Bicycle.
    Bike,
    /// Demand-responsive transit.
    Drt,
    /// Taxi.
    Taxi,
}

impl TransportMode {
    pub const ALL: [TransportMode; 7] = [
        TransportMode::Car,
        TransportMode::Ride,
        TransportMode::Pt,
        TransportMode::Walk,
        TransportMode::Bike,
        TransportMode::Drt,
        TransportMode::Taxi,
    ];

    /// `true` for modes whose legs are driven in the person's own vehicle,
    /// i.e. that produce enters/leaves-vehicle events for the traveller.
    #[inline]
    pub fn is_network_mode(self) -> bool {
        matches!(self, TransportMode::Car)
    }

    /// Stable lowercase label used in files and purpose strings.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Car  => "car",
            TransportMode::Ride => "ride",
            TransportMode::Pt   => "pt",
            TransportMode::Walk => "walk",
            TransportMode::Bike => "bike",
            TransportMode::Drt  => "drt",
            TransportMode::Taxi => "taxi",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<TransportMode, CoreError> {
        let s = s.trim();
        TransportMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CoreError::UnknownMode(s.to_owned()))
    }
}
