//! Simulation time model.
//!
//! Time is a whole number of seconds since the start of the simulated day
//! (which may run past 24:00:00).  Integer seconds keep event ordering exact;
//! all cost arithmetic converts to `f64` hours at the point of use.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Seconds since simulation start.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SimTime(pub u32);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// Build a time from hour/minute/second components.
    #[inline]
    pub const fn hms(h: u32, m: u32, s: u32) -> SimTime {
        SimTime(h * 3_600 + m * 60 + s)
    }

    #[inline]
    pub fn seconds(self) -> u32 {
        self.0
    }

    /// The time `secs` seconds after `self`, saturating at `u32::MAX`.
    #[inline]
    pub fn offset(self, secs: u32) -> SimTime {
        SimTime(self.0.saturating_add(secs))
    }
}

impl std::ops::Add<u32> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u32) -> SimTime {
        self.offset(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.0 / 3_600;
        let m = (self.0 % 3_600) / 60;
        let s = self.0 % 60;
        write!(f, "{h:02}:{m:02}:{s:02}")
    }
}

/// Accepts either plain seconds (`"27000"`) or `HH:MM:SS` / `HH:MM`.
impl FromStr for SimTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<SimTime, CoreError> {
        let s = s.trim();
        let invalid = || CoreError::InvalidTime(s.to_owned());

        if !s.contains(':') {
            return s.parse::<u32>().map(SimTime).map_err(|_| invalid());
        }

        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(invalid());
        }
        let mut fields = [0u32; 3];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| invalid())?;
        }
        let [h, m, sec] = fields;
        if m >= 60 || sec >= 60 {
            return Err(invalid());
        }
        Ok(SimTime::hms(h, m, sec))
    }
}
