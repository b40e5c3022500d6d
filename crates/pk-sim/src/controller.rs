//! The `Controller` struct and its iteration loop.

use pk_events::{EventHandler, EventsManager};
use pk_parking::ParkingCostHandler;
use pk_scoring::{MoneyLedger, ScoreStats};

use crate::{ControllerConfig, EventSource, IterationObserver, IterationSummary, SimError, SimResult};

/// Runs the configured iterations.
///
/// Create via [`ControllerBuilder`][crate::ControllerBuilder].
pub struct Controller<S: EventSource> {
    pub(crate) config: ControllerConfig,
    pub(crate) events: EventsManager,
    pub(crate) source: S,
    pub(crate) stats:  ScoreStats,
}

impl<S: EventSource> Controller<S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run every iteration of `config.iterations()`.
    ///
    /// The first handler error aborts the run; the stats of completed
    /// iterations stay available through [`score_stats`](Self::score_stats).
    pub fn run<O: IterationObserver>(&mut self, observer: &mut O) -> SimResult<&ScoreStats> {
        for iteration in self.config.iterations() {
            self.run_iteration(iteration, observer)?;
        }
        observer.on_run_end(&self.stats);
        Ok(&self.stats)
    }

    /// Run a single iteration and record its score.
    pub fn run_iteration<O: IterationObserver>(
        &mut self,
        iteration: u32,
        observer:  &mut O,
    ) -> SimResult<IterationSummary> {
        observer.on_iteration_start(iteration);
        self.events.reset_handlers(iteration);

        let events = self.source.events(iteration)?;
        self.events.process_all(events)?;
        self.events.finish_iteration(iteration)?;

        let ledger = self.events.handler::<MoneyLedger>().ok_or(SimError::MissingLedger)?;
        let summary = IterationSummary {
            iteration,
            events:                self.events.processed_count(),
            charges:               self
                .events
                .handler::<ParkingCostHandler>()
                .map_or(0, ParkingCostHandler::charges_emitted),
            total_amount:          ledger.total_amount(),
            average_money_utility: ledger.average_utility(),
        };
        self.stats.record(iteration, summary.average_money_utility);

        tracing::info!(
            iteration,
            events = summary.events,
            charges = summary.charges,
            total_amount = summary.total_amount,
            average_money_utility = summary.average_money_utility,
            "iteration finished"
        );
        observer.on_iteration_end(&summary);
        Ok(summary)
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn score_stats(&self) -> &ScoreStats {
        &self.stats
    }

    pub fn events(&self) -> &EventsManager {
        &self.events
    }

    /// Typed access to a registered handler.
    pub fn handler<H: EventHandler + 'static>(&self) -> Option<&H> {
        self.events.handler::<H>()
    }
}
