//! The `EventHandler` trait: the extension point for event consumers.

use std::any::Any;

use crate::{
    ActivityEndEvent, ActivityStartEvent, Event, PersonArrivalEvent, PersonDepartureEvent,
    PersonEntersVehicleEvent, PersonLeavesVehicleEvent, PersonMoneyEvent,
};

/// Type-erased handler error.  Handlers keep their own typed error enums and
/// convert with `?`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Return type of every handler callback.
pub type HandlerResult = Result<(), BoxError>;

// ── AsAny ─────────────────────────────────────────────────────────────────────

/// Downcasting support so callers can get typed access to a handler after it
/// has been boxed into an [`EventsManager`][crate::EventsManager].
///
/// Blanket-implemented for every `'static` type; never implement by hand.
pub trait AsAny {
    #[doc(hidden)]
    fn as_any(&self) -> &dyn Any;

    #[doc(hidden)]
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ── EventBuffer ───────────────────────────────────────────────────────────────

/// Collects events a handler emits while reacting to another event.
///
/// The manager dispatches buffered events after the triggering event has
/// reached every handler, in the order they were pushed.
#[derive(Debug, Default)]
pub struct EventBuffer {
    events: Vec<Event>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: impl Into<Event>) {
        self.events.push(event.into());
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Read-only view, mostly for tests that drive a handler directly.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Event> {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

// ── EventHandler ──────────────────────────────────────────────────────────────

/// Callbacks invoked by [`EventsManager`][crate::EventsManager] for every
/// dispatched event.
///
/// All per-kind methods default to no-ops so implementors only override the
/// event kinds they subscribe to.  Returning an error aborts the current
/// iteration; use it for broken preconditions only, never for ordinary
/// "not interested" branches.
///
/// # Example: departure counter
///
/// ```rust
/// use pk_events::{EventBuffer, EventHandler, HandlerResult, PersonDepartureEvent};
///
/// #[derive(Default)]
/// struct DepartureCounter { count: usize }
///
/// impl EventHandler for DepartureCounter {
///     fn name(&self) -> &str { "departure-counter" }
///
///     fn reset(&mut self, _iteration: u32) { self.count = 0; }
///
///     fn handle_departure(
///         &mut self,
///         _event: &PersonDepartureEvent,
///         _out:   &mut EventBuffer,
///     ) -> HandlerResult {
///         self.count += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait EventHandler: AsAny {
    /// Unique, human-readable name used in error messages and logs.
    fn name(&self) -> &str;

    /// Called before the first event of `iteration`.  Drop all per-iteration
    /// state here.
    fn reset(&mut self, _iteration: u32) {}

    /// Called after the last event of `iteration`.
    fn finish_iteration(&mut self, _iteration: u32) -> HandlerResult {
        Ok(())
    }

    fn handle_activity_start(&mut self, _event: &ActivityStartEvent, _out: &mut EventBuffer) -> HandlerResult {
        Ok(())
    }

    fn handle_activity_end(&mut self, _event: &ActivityEndEvent, _out: &mut EventBuffer) -> HandlerResult {
        Ok(())
    }

    fn handle_departure(&mut self, _event: &PersonDepartureEvent, _out: &mut EventBuffer) -> HandlerResult {
        Ok(())
    }

    fn handle_arrival(&mut self, _event: &PersonArrivalEvent, _out: &mut EventBuffer) -> HandlerResult {
        Ok(())
    }

    fn handle_enters_vehicle(&mut self, _event: &PersonEntersVehicleEvent, _out: &mut EventBuffer) -> HandlerResult {
        Ok(())
    }

    fn handle_leaves_vehicle(&mut self, _event: &PersonLeavesVehicleEvent, _out: &mut EventBuffer) -> HandlerResult {
        Ok(())
    }

    fn handle_money(&mut self, _event: &PersonMoneyEvent, _out: &mut EventBuffer) -> HandlerResult {
        Ok(())
    }

    /// Route `event` to the matching per-kind method.
    ///
    /// Override only for handlers that treat every kind the same way (e.g.
    /// output writers).
    fn handle_event(&mut self, event: &Event, out: &mut EventBuffer) -> HandlerResult {
        match event {
            Event::ActivityStart(e)       => self.handle_activity_start(e, out),
            Event::ActivityEnd(e)         => self.handle_activity_end(e, out),
            Event::PersonDeparture(e)     => self.handle_departure(e, out),
            Event::PersonArrival(e)       => self.handle_arrival(e, out),
            Event::PersonEntersVehicle(e) => self.handle_enters_vehicle(e, out),
            Event::PersonLeavesVehicle(e) => self.handle_leaves_vehicle(e, out),
            Event::PersonMoney(e)         => self.handle_money(e, out),
        }
    }
}
