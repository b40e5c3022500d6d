//! Scoring parameter sets, one per subpopulation.
//!
//! # TOML form
//!
//! ```toml
//! [[parameter_sets]]
//! performing_utils_hr       = 6.0
//! marginal_utility_of_money = 1.0
//!
//! [parameter_sets.modes.car]
//! marginal_utility_of_traveling_utils_hr = -2.0
//!
//! [[parameter_sets]]
//! subpopulation       = "freight"
//! performing_utils_hr = 0.0
//! ```
//!
//! The set without a `subpopulation` key is the default set, used for
//! persons that carry no subpopulation attribute.  Unknown keys are rejected
//! at every level.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

use pk_core::TransportMode;
use pk_population::Attributes;

use crate::{ScoringError, ScoringResult};

fn default_performing_utils_hr() -> f64 {
    6.0
}

fn default_marginal_utility_of_money() -> f64 {
    1.0
}

/// Mode tables are keyed by the mode's string form.
fn deserialize_modes<'de, D>(deserializer: D) -> Result<HashMap<TransportMode, ModeParams>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, ModeParams>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, params)| {
            key.parse::<TransportMode>()
                .map(|mode| (mode, params))
                .map_err(serde::de::Error::custom)
        })
        .collect()
}

// ── ModeParams ────────────────────────────────────────────────────────────────

/// Mode-specific travel-time and constant terms.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModeParams {
    /// Marginal utility of one hour spent travelling with this mode.
    /// Usually negative.
    pub marginal_utility_of_traveling_utils_hr: f64,

    /// Alternative-specific constant added per leg.
    #[serde(default)]
    pub constant: f64,
}

impl ModeParams {
    pub fn new(marginal_utility_of_traveling_utils_hr: f64) -> Self {
        Self { marginal_utility_of_traveling_utils_hr, constant: 0.0 }
    }
}

// ── ScoringParameterSet ───────────────────────────────────────────────────────

/// Utility rates of one subpopulation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringParameterSet {
    /// `None` marks the default set.
    #[serde(default)]
    pub subpopulation: Option<String>,

    /// Marginal utility of performing an activity, per hour.
    #[serde(default = "default_performing_utils_hr")]
    pub performing_utils_hr: f64,

    /// Fallback utils-per-money factor for persons without their own
    /// attribute.
    #[serde(default = "default_marginal_utility_of_money")]
    pub marginal_utility_of_money: f64,

    #[serde(default, deserialize_with = "deserialize_modes")]
    pub modes: HashMap<TransportMode, ModeParams>,
}

impl ScoringParameterSet {
    /// A set with default rates and no mode parameters.
    pub fn new(subpopulation: Option<&str>) -> Self {
        Self {
            subpopulation:             subpopulation.map(str::to_owned),
            performing_utils_hr:       default_performing_utils_hr(),
            marginal_utility_of_money: default_marginal_utility_of_money(),
            modes:                     HashMap::new(),
        }
    }

    pub fn with_performing(mut self, utils_hr: f64) -> Self {
        self.performing_utils_hr = utils_hr;
        self
    }

    pub fn with_marginal_utility_of_money(mut self, mum: f64) -> Self {
        self.marginal_utility_of_money = mum;
        self
    }

    pub fn with_mode(mut self, mode: TransportMode, traveling_utils_hr: f64) -> Self {
        self.modes.insert(mode, ModeParams::new(traveling_utils_hr));
        self
    }

    /// Parameters for `mode`, or an error naming this set's subpopulation.
    pub fn mode(&self, mode: TransportMode) -> ScoringResult<&ModeParams> {
        self.modes.get(&mode).ok_or_else(|| ScoringError::MissingModeParams {
            subpopulation: self.subpopulation.clone(),
            mode,
        })
    }
}

// ── ScoringConfig ─────────────────────────────────────────────────────────────

/// All parameter sets of a run.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    parameter_sets: Vec<ScoringParameterSet>,
}

impl ScoringConfig {
    /// Build and validate a config from parameter sets.
    pub fn new(parameter_sets: Vec<ScoringParameterSet>) -> ScoringResult<Self> {
        let config = Self { parameter_sets };
        config.validate()?;
        Ok(config)
    }

    /// Reject duplicate subpopulations and zero money factors.  Call after
    /// deserializing.
    pub fn validate(&self) -> ScoringResult<()> {
        for (i, set) in self.parameter_sets.iter().enumerate() {
            if self.parameter_sets[..i]
                .iter()
                .any(|other| other.subpopulation == set.subpopulation)
            {
                return Err(ScoringError::DuplicateSubpopulation(set.subpopulation.clone()));
            }
            if set.marginal_utility_of_money == 0.0 {
                return Err(ScoringError::ZeroMarginalUtilityOfMoney(set.subpopulation.clone()));
            }
        }
        Ok(())
    }

    pub fn parameter_sets(&self) -> &[ScoringParameterSet] {
        &self.parameter_sets
    }

    /// The set for `subpopulation` (`None` = default set).
    pub fn parameters(&self, subpopulation: Option<&str>) -> ScoringResult<&ScoringParameterSet> {
        self.parameter_sets
            .iter()
            .find(|set| set.subpopulation.as_deref() == subpopulation)
            .ok_or_else(|| ScoringError::UnknownSubpopulation(subpopulation.map(str::to_owned)))
    }

    /// The set selected by a person's `subpopulation` attribute.
    pub fn parameters_for(&self, attributes: &Attributes) -> ScoringResult<&ScoringParameterSet> {
        self.parameters(attributes.subpopulation())
    }
}
