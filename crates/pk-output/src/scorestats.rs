//! `scorestats.csv`: one row per iteration.

use std::path::{Path, PathBuf};

use pk_scoring::ScoreStats;
use pk_sim::IterationObserver;

use crate::{OutputError, OutputResult};

pub const SCORE_STATS_FILE: &str = "scorestats.csv";

/// Write `stats` to `dir/scorestats.csv`, replacing any previous file.
/// Returns the path written.
pub fn write_score_stats_csv(dir: &Path, stats: &ScoreStats) -> OutputResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(SCORE_STATS_FILE);
    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["iteration", "avg_money_utility"])?;
    for (iteration, average) in stats.history() {
        writer.write_record(&[iteration.to_string(), average.to_string()])?;
    }
    writer.flush()?;
    Ok(path)
}

/// An [`IterationObserver`] that keeps `scorestats.csv` current: the file is
/// rewritten after every iteration, so an aborted run still leaves the
/// history of the iterations it completed.
///
/// Errors are stored internally because observer methods have no return
/// value.  After `controller.run()` returns, check them with
/// [`take_error`][Self::take_error].
pub struct ScoreStatsObserver {
    dir:        PathBuf,
    stats:      ScoreStats,
    last_error: Option<OutputError>,
}

impl ScoreStatsObserver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), stats: ScoreStats::new(), last_error: None }
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn store_err(&mut self, result: OutputResult<PathBuf>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                tracing::warn!(error = %e, "cannot write score stats");
                self.last_error = Some(e);
            }
        }
    }
}

impl IterationObserver for ScoreStatsObserver {
    fn on_iteration_end(&mut self, summary: &pk_sim::IterationSummary) {
        self.stats.record(summary.iteration, summary.average_money_utility);
        let result = write_score_stats_csv(&self.dir, &self.stats);
        self.store_err(result);
    }

    fn on_run_end(&mut self, stats: &ScoreStats) {
        // The controller's history is authoritative.
        self.stats = stats.clone();
        let result = write_score_stats_csv(&self.dir, &self.stats);
        self.store_err(result);
    }
}
