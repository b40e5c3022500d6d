//! `EventsOutputHandler<W>`: bridges the event stream to an `EventWriter`.

use pk_events::{Event, EventBuffer, EventHandler, HandlerResult};
use pk_sim::ControllerConfig;

use crate::row::EventRow;
use crate::writer::EventWriter;

/// An [`EventHandler`] that records every event of the iterations selected
/// by `write_events_interval` and hands them to any [`EventWriter`] backend
/// when the iteration finishes.
///
/// The writer is finished after the last configured iteration.  Write
/// errors abort the run like any other handler error.
pub struct EventsOutputHandler<W: EventWriter> {
    writer:    W,
    config:    ControllerConfig,
    iteration: u32,
    active:    bool,
    rows:      Vec<EventRow>,
    written:   u64,
}

impl<W: EventWriter> EventsOutputHandler<W> {
    pub const NAME: &'static str = "events-output";

    pub fn new(writer: W, config: &ControllerConfig) -> Self {
        Self {
            writer,
            config:    config.clone(),
            iteration: config.first_iteration,
            active:    false,
            rows:      Vec::new(),
            written:   0,
        }
    }

    /// Events written over the whole run.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: EventWriter + 'static> EventHandler for EventsOutputHandler<W> {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn reset(&mut self, iteration: u32) {
        self.iteration = iteration;
        self.active = self.config.writes_events(iteration);
        self.rows.clear();
    }

    fn handle_event(&mut self, event: &Event, _out: &mut EventBuffer) -> HandlerResult {
        if self.active {
            self.rows.push(EventRow::from_event(self.iteration, event));
        }
        Ok(())
    }

    fn finish_iteration(&mut self, iteration: u32) -> HandlerResult {
        if self.active {
            self.writer.write_events(&self.rows)?;
            self.written += self.rows.len() as u64;
            tracing::debug!(iteration, events = self.rows.len(), "events written");
            self.rows.clear();
        }
        if iteration >= self.config.last_iteration {
            self.writer.finish()?;
        }
        Ok(())
    }
}
