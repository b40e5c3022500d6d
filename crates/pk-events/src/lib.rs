//! `pk-events`: the event stream every handler observes.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`event`]   | `Event` enum and one payload struct per event kind         |
//! | [`handler`] | `EventHandler` trait, `EventBuffer`, `HandlerResult`       |
//! | [`manager`] | `EventsManager`: registration, dispatch, iteration reset  |
//! | [`error`]   | `EventsError`, `EventsResult<T>`                           |
//!
//! # Dispatch model
//!
//! ```text
//! process_event(e):
//!   queue = [e]
//!   while let Some(ev) = queue.pop_front():
//!     check ev.time >= last dispatched time      (else OutOfOrder)
//!     for h in handlers (registration order):
//!       h.handle_*(ev, &mut buffer)?              (error aborts dispatch)
//!     queue.extend(buffer.drain())                (follow-ups, FIFO)
//! ```
//!
//! Everything runs on the caller's thread.  Handlers own their state and
//! never need locks as long as one `EventsManager` feeds them.

pub mod error;
pub mod event;
pub mod handler;
pub mod manager;


pub use error::{EventsError, EventsResult};
pub use event::{
    ActivityEndEvent, ActivityStartEvent, Event, PersonArrivalEvent, PersonDepartureEvent,
    PersonEntersVehicleEvent, PersonLeavesVehicleEvent, PersonMoneyEvent,
};
pub use handler::{AsAny, BoxError, EventBuffer, EventHandler, HandlerResult};
pub use manager::EventsManager;
