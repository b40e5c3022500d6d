//! `pk-output`: run output writers.
//!
//! Two event backends are provided, the second behind a Cargo feature:
//!
//! | Feature   | Backend | Files created  |
//! |-----------|---------|----------------|
//! | *(none)*  | CSV     | `events.csv`   |
//! | `sqlite`  | SQLite  | `output.db`    |
//!
//! Both implement [`EventWriter`] and are driven by [`EventsOutputHandler`],
//! an event handler registered next to the parking handler.  Score
//! statistics go to `scorestats.csv` through [`write_score_stats_csv`] or
//! the [`ScoreStatsObserver`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use pk_output::{CsvEventWriter, EventsOutputHandler, ScoreStatsObserver};
//!
//! let writer = CsvEventWriter::new(&dir)?;
//! let mut controller = ControllerBuilder::new(config.clone(), population)
//!     .handler(EventsOutputHandler::new(writer, &config.controller))
//!     .build()?;
//! let mut stats_out = ScoreStatsObserver::new(&dir);
//! controller.run(&mut stats_out)?;
//! stats_out.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod handler;
pub mod row;
pub mod scorestats;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvEventWriter;
pub use error::{OutputError, OutputResult};
pub use handler::EventsOutputHandler;
pub use row::EventRow;
pub use scorestats::{SCORE_STATS_FILE, ScoreStatsObserver, write_score_stats_csv};
pub use writer::EventWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteEventWriter;
