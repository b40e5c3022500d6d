use pk_core::PersonId;
use pk_scoring::ScoringError;
use thiserror::Error;

/// Broken preconditions of the parking charge.  Every variant is fatal: a
/// silently skipped or defaulted charge would distort all downstream scores.
#[derive(Debug, Error, PartialEq)]
pub enum ParkingError {
    #[error("{0} does not have a marginal utility of money")]
    MissingMarginalUtilityOfMoney(PersonId),

    #[error("{person} has a non-numeric marginal utility of money {value:?}")]
    InvalidMarginalUtilityOfMoney { person: PersonId, value: String },

    #[error("parking charge must be a finite negative amount, got {amount}")]
    InvalidCharge { amount: f64 },

    #[error("{0} departed without a previous activity in this iteration")]
    NoPreviousActivity(PersonId),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("parking configuration error: {0}")]
    Config(String),
}

pub type ParkingResult<T> = Result<T, ParkingError>;
