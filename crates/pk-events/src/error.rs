use pk_core::SimTime;
use thiserror::Error;

use crate::BoxError;

#[derive(Debug, Error)]
pub enum EventsError {
    /// A handler rejected an event.  Fatal for the iteration.
    #[error("handler {handler} failed at {time}: {source}")]
    Handler {
        handler: String,
        time:    SimTime,
        #[source]
        source:  BoxError,
    },

    #[error("event at {got} arrived after an event at {last}")]
    OutOfOrder { last: SimTime, got: SimTime },

    #[error("a handler named {0:?} is already registered")]
    DuplicateHandler(String),
}

pub type EventsResult<T> = Result<T, EventsError>;
