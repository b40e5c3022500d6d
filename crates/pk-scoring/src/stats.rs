//! Per-iteration score statistics.

use std::collections::BTreeMap;

/// Average money utility per person, recorded once per iteration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreStats {
    history: BTreeMap<u32, f64>,
}

impl ScoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the average for `iteration`.
    pub fn record(&mut self, iteration: u32, average: f64) {
        self.history.insert(iteration, average);
    }

    pub fn get(&self, iteration: u32) -> Option<f64> {
        self.history.get(&iteration).copied()
    }

    /// `(iteration, average)` pairs in iteration order.
    pub fn history(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.history.iter().map(|(&i, &v)| (i, v))
    }

    pub fn last(&self) -> Option<(u32, f64)> {
        self.history.iter().next_back().map(|(&i, &v)| (i, v))
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
