//! `ParkingCostConfig`: which departures are charged and how much time
//! they lose.

use std::collections::BTreeSet;

use pk_core::TransportMode;
use serde::Deserialize;

use crate::{ParkingError, ParkingResult};

/// Parameters of the parking charge.
///
/// Every field has a default, so an empty `[parking]` table is a valid
/// configuration:
///
/// ```toml
/// [parking]
/// modes                      = ["car", "ride"]
/// excluded_activity_prefixes = ["home", "work"]
/// parking_search_seconds     = 720.0
/// additional_walking_seconds = 180.0
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParkingCostConfig {
    /// Departures with these modes are charged.
    pub modes: BTreeSet<TransportMode>,

    /// Departures from an activity whose type starts with one of these
    /// prefixes are free (the agent has a private parking spot there).
    pub excluded_activity_prefixes: Vec<String>,

    /// Time spent cruising for a spot, in seconds.
    pub parking_search_seconds: f64,

    /// Walking time between spot and destination, in seconds.  Counted twice:
    /// once to the activity and once back to the vehicle.
    pub additional_walking_seconds: f64,
}

impl Default for ParkingCostConfig {
    fn default() -> Self {
        Self {
            modes: [TransportMode::Car, TransportMode::Ride].into_iter().collect(),
            excluded_activity_prefixes: vec!["home".to_owned(), "work".to_owned()],
            parking_search_seconds: 720.0,
            additional_walking_seconds: 180.0,
        }
    }
}

impl ParkingCostConfig {
    /// `parking_search_seconds + 2 × additional_walking_seconds`.
    pub fn additional_time_loss_seconds(&self) -> f64 {
        self.parking_search_seconds + 2.0 * self.additional_walking_seconds
    }

    pub fn is_monitored(&self, mode: TransportMode) -> bool {
        self.modes.contains(&mode)
    }

    /// `true` if departures from an activity of `act_type` are free.
    pub fn is_excluded(&self, act_type: &str) -> bool {
        self.excluded_activity_prefixes
            .iter()
            .any(|prefix| act_type.starts_with(prefix.as_str()))
    }

    /// Reject configurations that can only produce invalid charges or none
    /// at all.
    pub fn validate(&self) -> ParkingResult<()> {
        if self.modes.is_empty() {
            return Err(ParkingError::Config("no monitored modes".into()));
        }
        if self.excluded_activity_prefixes.iter().any(|p| p.trim().is_empty()) {
            // An empty prefix matches every activity type.
            return Err(ParkingError::Config("empty excluded activity prefix".into()));
        }
        for (name, value) in [
            ("parking_search_seconds", self.parking_search_seconds),
            ("additional_walking_seconds", self.additional_walking_seconds),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ParkingError::Config(format!("{name} must be finite and >= 0, got {value}")));
            }
        }
        if self.additional_time_loss_seconds() <= 0.0 {
            return Err(ParkingError::Config("additional time loss must be positive".into()));
        }
        Ok(())
    }
}
