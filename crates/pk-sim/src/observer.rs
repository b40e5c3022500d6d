//! Iteration observer trait for progress reporting and data collection.

use pk_scoring::ScoreStats;

/// What happened in one iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationSummary {
    pub iteration: u32,
    /// Events dispatched, handler follow-ups included.
    pub events: u64,
    /// Parking charges issued.
    pub charges: u64,
    /// Sum of all money amounts.
    pub total_amount: f64,
    /// Average money utility over the population.
    pub average_money_utility: f64,
}

/// Callbacks invoked by [`Controller::run`][crate::Controller::run] at
/// iteration boundaries.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust
/// use pk_sim::{IterationObserver, IterationSummary};
///
/// struct ProgressPrinter;
///
/// impl IterationObserver for ProgressPrinter {
///     fn on_iteration_end(&mut self, summary: &IterationSummary) {
///         println!("iteration {}: {} charges", summary.iteration, summary.charges);
///     }
/// }
/// ```
pub trait IterationObserver {
    fn on_iteration_start(&mut self, _iteration: u32) {}

    fn on_iteration_end(&mut self, _summary: &IterationSummary) {}

    /// Called once after the last iteration.
    fn on_run_end(&mut self, _stats: &ScoreStats) {}
}

/// An [`IterationObserver`] that does nothing.
pub struct NoopObserver;

impl IterationObserver for NoopObserver {}
