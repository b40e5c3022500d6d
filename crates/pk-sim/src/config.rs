//! `RunConfig`: the TOML file that drives a run.

use std::path::{Path, PathBuf};

use pk_parking::ParkingCostConfig;
use pk_scoring::ScoringConfig;
use serde::Deserialize;

use crate::{SimError, SimResult};

/// Iteration range and output settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    pub first_iteration: u32,
    /// Inclusive.
    pub last_iteration: u32,
    /// Where output handlers write.  `None` disables file output.
    pub output_directory: Option<PathBuf>,
    /// Write events every n-th iteration (and in the last one).  0 = never.
    pub write_events_interval: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            first_iteration:       0,
            last_iteration:        0,
            output_directory:      None,
            write_events_interval: 10,
        }
    }
}

impl ControllerConfig {
    pub fn iterations(&self) -> std::ops::RangeInclusive<u32> {
        self.first_iteration..=self.last_iteration
    }

    /// `true` if events of `iteration` should be written to disk.
    pub fn writes_events(&self, iteration: u32) -> bool {
        if self.write_events_interval == 0 {
            return false;
        }
        iteration == self.last_iteration || iteration.is_multiple_of(self.write_events_interval)
    }
}

/// Whole-run configuration:
///
/// ```toml
/// [controller]
/// first_iteration       = 0
/// last_iteration        = 10
/// output_directory      = "output"
/// write_events_interval = 5
///
/// [parking]
/// parking_search_seconds = 600.0
///
/// [[scoring.parameter_sets]]
/// performing_utils_hr       = 6.0
/// marginal_utility_of_money = 1.0
/// [scoring.parameter_sets.modes.car]
/// marginal_utility_of_traveling_utils_hr = -2.0
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub controller: ControllerConfig,
    pub parking:    ParkingCostConfig,
    pub scoring:    ScoringConfig,
}

impl RunConfig {
    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> SimResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.controller.first_iteration > self.controller.last_iteration {
            return Err(SimError::Config(format!(
                "first_iteration {} is after last_iteration {}",
                self.controller.first_iteration, self.controller.last_iteration
            )));
        }
        self.parking.validate()?;
        self.scoring.validate()?;
        Ok(())
    }
}

/// Read, parse and validate the run configuration at `path`.
pub fn load_run_config(path: impl AsRef<Path>) -> SimResult<RunConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
        path: path.to_owned(),
        source,
    })?;
    let config: RunConfig = toml::from_str(&text).map_err(|source| SimError::ConfigParse {
        path: path.to_owned(),
        source,
    })?;
    config.validate()?;
    tracing::info!(
        path = %path.display(),
        first = config.controller.first_iteration,
        last = config.controller.last_iteration,
        parameter_sets = config.scoring.parameter_sets().len(),
        "loaded run configuration"
    );
    Ok(config)
}
