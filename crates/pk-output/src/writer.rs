//! The `EventWriter` trait implemented by all backend writers.

use crate::{EventRow, OutputResult};

/// Trait implemented by the CSV and SQLite writers.
pub trait EventWriter {
    /// Write one iteration's worth of events.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
