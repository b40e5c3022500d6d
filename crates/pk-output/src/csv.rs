//! CSV output backend.
//!
//! Creates `events.csv` in the configured output directory.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::EventWriter;
use crate::{EventRow, OutputResult};

pub const EVENTS_FILE: &str = "events.csv";

/// Writes events of all written iterations to one CSV file.
pub struct CsvEventWriter {
    events:   Writer<File>,
    finished: bool,
}

impl CsvEventWriter {
    /// Create `events.csv` in `dir` (and `dir` itself if needed) and write
    /// the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let mut events = Writer::from_path(dir.join(EVENTS_FILE))?;
        events.write_record(EventRow::HEADER)?;
        Ok(Self { events, finished: false })
    }
}

fn cell<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(T::to_string).unwrap_or_default()
}

impl EventWriter for CsvEventWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.iteration.to_string(),
                row.time.to_string(),
                row.kind.to_owned(),
                row.person.to_string(),
                cell(&row.mode),
                cell(&row.act_type),
                cell(&row.vehicle),
                cell(&row.amount),
                cell(&row.purpose),
                cell(&row.partner),
            ])?;
        }
        self.events.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        Ok(())
    }
}
