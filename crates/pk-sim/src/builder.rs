//! Fluent builder for constructing a [`Controller`].

use std::sync::Arc;

use pk_events::{EventHandler, EventsManager};
use pk_parking::ParkingCostHandler;
use pk_population::Population;
use pk_scoring::{MoneyLedger, ScoreStats};

use crate::{Controller, EventSource, PlanReplay, RunConfig, SimResult};

/// Fluent builder for [`Controller<S>`].
///
/// # Required inputs
///
/// - [`RunConfig`]: iterations, parking and scoring parameters
/// - `Arc<Population>`: shared with the handlers
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                  |
/// |-----------------|------------------------------------------|
/// | `.source(s)`    | [`PlanReplay`] of the population         |
/// | `.handler(h)`   | none; added after the built-in handlers  |
///
/// The parking handler and the money ledger are always registered, in that
/// order, so the ledger sees every charge.
///
/// # Example
///
/// ```rust,ignore
/// let mut controller = ControllerBuilder::new(config, population)
///     .handler(EventsOutputHandler::new(writer, interval, last))
///     .build()?;
/// controller.run(&mut NoopObserver)?;
/// ```
pub struct ControllerBuilder<S: EventSource = PlanReplay> {
    config:     RunConfig,
    population: Arc<Population>,
    source:     S,
    handlers:   Vec<Box<dyn EventHandler>>,
}

impl ControllerBuilder<PlanReplay> {
    pub fn new(config: RunConfig, population: Arc<Population>) -> Self {
        Self {
            source: PlanReplay::new(Arc::clone(&population)),
            config,
            population,
            handlers: Vec::new(),
        }
    }
}

impl<S: EventSource> ControllerBuilder<S> {
    /// Replace the event source.
    pub fn source<T: EventSource>(self, source: T) -> ControllerBuilder<T> {
        ControllerBuilder {
            config:     self.config,
            population: self.population,
            source,
            handlers:   self.handlers,
        }
    }

    /// Register an additional handler.  Names must be unique.
    pub fn handler<H: EventHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Validate the configuration, register all handlers and return a
    /// ready-to-run [`Controller`].
    pub fn build(self) -> SimResult<Controller<S>> {
        self.config.validate()?;
        let RunConfig { controller, parking, scoring } = self.config;
        let scoring = Arc::new(scoring);

        let mut events = EventsManager::new();
        events.add_handler(ParkingCostHandler::new(
            parking,
            Arc::clone(&self.population),
            Arc::clone(&scoring),
        )?)?;
        events.add_handler(MoneyLedger::new(Arc::clone(&self.population), scoring))?;
        for handler in self.handlers {
            events.add_boxed_handler(handler)?;
        }

        tracing::info!(
            persons = self.population.len(),
            handlers = events.handler_count(),
            first = controller.first_iteration,
            last = controller.last_iteration,
            "controller ready"
        );
        Ok(Controller {
            config: controller,
            events,
            source: self.source,
            stats: ScoreStats::new(),
        })
    }
}
