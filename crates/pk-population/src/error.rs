use pk_core::{CoreError, PersonId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PopulationError {
    #[error("population parse error: {0}")]
    Parse(String),

    #[error("duplicate person {0}")]
    DuplicatePerson(PersonId),

    #[error("plan of {person} is malformed: {reason}")]
    MalformedPlan {
        person: PersonId,
        reason: &'static str,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PopulationResult<T> = Result<T, PopulationError>;
