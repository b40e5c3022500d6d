//! `pk-scoring`: turning time and money into utility.
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`params`] | `ScoringConfig`, `ScoringParameterSet`, `ModeParams`        |
//! | [`ledger`] | `MoneyLedger`: event handler summing money per person      |
//! | [`stats`]  | `ScoreStats`: per-iteration average money utility          |
//! | [`error`]  | `ScoringError`, `ScoringResult<T>`                          |
//!
//! Only the money term of a plan score lives here.  Activity and travel
//! scoring belong to the host simulation.

pub mod error;
pub mod ledger;
pub mod params;
pub mod stats;


pub use error::{ScoringError, ScoringResult};
pub use ledger::{MoneyLedger, PersonMoney};
pub use params::{ModeParams, ScoringConfig, ScoringParameterSet};
pub use stats::ScoreStats;
