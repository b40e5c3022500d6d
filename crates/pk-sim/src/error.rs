use std::path::PathBuf;

use pk_events::EventsError;
use pk_parking::ParkingError;
use pk_scoring::ScoringError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("run configuration error: {0}")]
    Config(String),

    #[error("cannot read {path}: {source}")]
    ConfigRead {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    ConfigParse {
        path:   PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Events(#[from] EventsError),

    #[error(transparent)]
    Parking(#[from] ParkingError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("no money ledger registered")]
    MissingLedger,
}

pub type SimResult<T> = Result<T, SimError>;
