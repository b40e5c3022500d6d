//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! one `events` table.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::EventWriter;
use crate::{EventRow, OutputResult};

pub const DATABASE_FILE: &str = "output.db";

/// Writes events to an SQLite database, one transaction per iteration.
pub struct SqliteEventWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteEventWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join(DATABASE_FILE))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS events (
                 iteration INTEGER NOT NULL,
                 time      INTEGER NOT NULL,
                 type      TEXT    NOT NULL,
                 person    INTEGER NOT NULL,
                 mode      TEXT,
                 act_type  TEXT,
                 vehicle   INTEGER,
                 amount    REAL,
                 purpose   TEXT,
                 partner   TEXT
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl EventWriter for SqliteEventWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO events \
                 (iteration, time, type, person, mode, act_type, vehicle, amount, purpose, partner) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.iteration,
                    row.time,
                    row.kind,
                    row.person,
                    row.mode,
                    row.act_type,
                    row.vehicle,
                    row.amount,
                    row.purpose,
                    row.partner,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
