//! `pk-sim`: the iteration loop around the parking charge.
//!
//! # Iteration loop
//!
//! ```text
//! for iteration in first..=last:
//!   ① Reset     every registered handler drops its per-iteration state.
//!   ② Source    the EventSource produces the iteration's events
//!               (PlanReplay: one pass over every person's plan).
//!   ③ Dispatch  events go through the EventsManager in time order;
//!               the parking handler's charges follow their departures.
//!   ④ Finish    handlers flush (output writers close their files).
//!   ⑤ Score     the MoneyLedger's average utility is recorded in ScoreStats.
//! ```
//!
//! A handler error in ③ or ④ aborts the run with [`SimError::Events`].
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `PlanReplay` builds per-person events with Rayon.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let config = load_run_config("config.toml")?;
//! let population = Arc::new(load_population_csv(&persons, &plans)?);
//! let mut controller = ControllerBuilder::new(config, population).build()?;
//! let stats = controller.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod observer;
pub mod replay;
pub mod source;


pub use builder::ControllerBuilder;
pub use config::{ControllerConfig, RunConfig, load_run_config};
pub use controller::Controller;
pub use error::{SimError, SimResult};
pub use observer::{IterationObserver, IterationSummary, NoopObserver};
pub use replay::PlanReplay;
pub use source::EventSource;
