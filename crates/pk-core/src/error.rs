//! Error type for parsing the primitive types in this crate.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown transport mode {0:?}")]
    UnknownMode(String),

    #[error("invalid time {0:?}: expected seconds or HH:MM:SS")]
    InvalidTime(String),
}

/// Shorthand result type for `pk-core`.
pub type CoreResult<T> = Result<T, CoreError>;
