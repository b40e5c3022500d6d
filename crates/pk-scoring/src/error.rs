use pk_core::{PersonId, TransportMode};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("no scoring parameters for subpopulation {0:?}")]
    UnknownSubpopulation(Option<String>),

    #[error("subpopulation {0:?} has more than one parameter set")]
    DuplicateSubpopulation(Option<String>),

    #[error("no mode parameters for {mode} in subpopulation {subpopulation:?}")]
    MissingModeParams {
        subpopulation: Option<String>,
        mode:          TransportMode,
    },

    #[error("marginal utility of money must be non-zero (subpopulation {0:?})")]
    ZeroMarginalUtilityOfMoney(Option<String>),

    #[error("person {person} has a non-numeric marginal utility of money: {value}")]
    InvalidMarginalUtilityOfMoney {
        person: PersonId,
        value:  String,
    },
}

pub type ScoringResult<T> = Result<T, ScoringError>;
