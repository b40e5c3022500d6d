//! `EventsManager`: owns the handlers and dispatches events to them.

use std::collections::VecDeque;

use pk_core::SimTime;

use crate::{Event, EventBuffer, EventHandler, EventsError, EventsResult};

/// Synchronous, time-ordered event dispatcher.
///
/// Handlers are called in registration order.  Events a handler emits are
/// dispatched after the triggering event has reached every handler, so each
/// handler sees a consistent, non-decreasing sequence of timestamps.
///
/// # Example
///
/// ```rust,ignore
/// let mut events = EventsManager::new();
/// events.add_handler(ParkingCostHandler::new(cfg, population, scoring)?)?;
/// events.reset_handlers(0);
/// for e in replay.events_for_iteration(0, &population) {
///     events.process_event(e)?;
/// }
/// events.finish_iteration(0)?;
/// ```
#[derive(Default)]
pub struct EventsManager {
    handlers:  Vec<Box<dyn EventHandler>>,
    queue:     VecDeque<Event>,
    buffer:    EventBuffer,
    last_time: SimTime,
    /// Events dispatched since the last reset, follow-ups included.
    processed: u64,
}

impl EventsManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Register `handler`.  Names must be unique.
    pub fn add_handler<H: EventHandler + 'static>(&mut self, handler: H) -> EventsResult<()> {
        self.add_boxed_handler(Box::new(handler))
    }

    /// Register an already boxed handler, e.g. one collected by a builder.
    pub fn add_boxed_handler(&mut self, handler: Box<dyn EventHandler>) -> EventsResult<()> {
        if self.handlers.iter().any(|h| h.name() == handler.name()) {
            return Err(EventsError::DuplicateHandler(handler.name().to_owned()));
        }
        tracing::debug!(handler = handler.name(), "registered event handler");
        self.handlers.push(handler);
        Ok(())
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Typed access to the first registered handler of type `H`.
    pub fn handler<H: EventHandler + 'static>(&self) -> Option<&H> {
        self.handlers
            .iter()
            .find_map(|h| (**h).as_any().downcast_ref::<H>())
    }

    /// Mutable typed access to the first registered handler of type `H`.
    pub fn handler_mut<H: EventHandler + 'static>(&mut self) -> Option<&mut H> {
        self.handlers
            .iter_mut()
            .find_map(|h| (**h).as_any_mut().downcast_mut::<H>())
    }

    // ── Iteration lifecycle ───────────────────────────────────────────────

    /// Start `iteration`: rewind the clock and reset every handler.
    pub fn reset_handlers(&mut self, iteration: u32) {
        self.discard_pending();
        self.last_time = SimTime::ZERO;
        self.processed = 0;
        for h in &mut self.handlers {
            h.reset(iteration);
        }
        tracing::debug!(iteration, handlers = self.handlers.len(), "handlers reset");
    }

    /// End `iteration`: give every handler the chance to flush.
    pub fn finish_iteration(&mut self, iteration: u32) -> EventsResult<()> {
        for h in &mut self.handlers {
            h.finish_iteration(iteration).map_err(|source| EventsError::Handler {
                handler: h.name().to_owned(),
                time:    self.last_time,
                source,
            })?;
        }
        Ok(())
    }

    /// Events dispatched since the last [`reset_handlers`](Self::reset_handlers),
    /// including handler follow-ups.
    pub fn processed_count(&self) -> u64 {
        self.processed
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    /// Dispatch `event` and every follow-up event it triggers.
    ///
    /// On error the pending follow-ups are discarded.
    pub fn process_event(&mut self, event: impl Into<Event>) -> EventsResult<()> {
        self.queue.push_back(event.into());

        while let Some(event) = self.queue.pop_front() {
            let time = event.time();
            if time < self.last_time {
                let last = self.last_time;
                self.discard_pending();
                return Err(EventsError::OutOfOrder { last, got: time });
            }
            self.last_time = time;

            let mut failure = None;
            for h in self.handlers.iter_mut() {
                if let Err(source) = h.handle_event(&event, &mut self.buffer) {
                    failure = Some((h.name().to_owned(), source));
                    break;
                }
            }
            if let Some((handler, source)) = failure {
                self.discard_pending();
                return Err(EventsError::Handler { handler, time, source });
            }
            self.processed += 1;
            self.queue.extend(self.buffer.drain());
        }
        Ok(())
    }

    /// Dispatch every event of `events` in order; returns how many source
    /// events were consumed.
    pub fn process_all<I>(&mut self, events: I) -> EventsResult<usize>
    where
        I: IntoIterator,
        I::Item: Into<Event>,
    {
        let mut n = 0;
        for event in events {
            self.process_event(event)?;
            n += 1;
        }
        Ok(n)
    }

    fn discard_pending(&mut self) {
        self.queue.clear();
        self.buffer.clear();
    }
}
