//! `pk-parking`: pricing the time lost to parking search and walking.
//!
//! Whenever a population member departs with a monitored mode (car, ride by
//! default) and did not come from an excluded activity (home, work by
//! default), the handler charges them the monetary equivalent of
//!
//! ```text
//! time_loss      = parking_search + 2 × additional_walking          [s]
//! disutility/h   = performing − marginal_utility_of_traveling(mode)  [utils/h]
//! amount         = −(time_loss / 3600 × disutility/h) / marginal_utility_of_money
//! ```
//!
//! and emits it as a money event with purpose
//! `additionalParkingSearchAndWalkingTime_mode-<mode>_act-<previous activity>`.
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`config`]  | `ParkingCostConfig` (serde, with defaults)             |
//! | [`charge`]  | `time_loss_charge`, `charge_purpose`                   |
//! | [`handler`] | `ParkingCostHandler`                                   |
//! | [`error`]   | `ParkingError`, `ParkingResult<T>`                     |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the per-person maps.      |

pub mod charge;
pub mod config;
pub mod error;
pub mod handler;

#[cfg(test)]
mod tests;

pub use charge::{PURPOSE_PREFIX, TRANSACTION_PARTNER, charge_purpose, time_loss_charge};
pub use config::ParkingCostConfig;
pub use error::{ParkingError, ParkingResult};
pub use handler::ParkingCostHandler;
