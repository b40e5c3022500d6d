//! `ParkingCostHandler`: the event handler that issues parking charges.

use std::sync::Arc;

use pk_core::{PersonId, SimTime};
use pk_events::{
    ActivityEndEvent, EventBuffer, EventHandler, HandlerResult, PersonDepartureEvent,
    PersonLeavesVehicleEvent, PersonMoneyEvent,
};
use pk_population::{MARGINAL_UTILITY_OF_MONEY, Population, is_stage_activity};
use pk_scoring::ScoringConfig;

use crate::{
    ParkingCostConfig, ParkingError, ParkingResult, TRANSACTION_PARTNER, charge_purpose,
    time_loss_charge,
};

#[cfg(feature = "fx-hash")]
type PersonMap<V> = rustc_hash::FxHashMap<PersonId, V>;
#[cfg(not(feature = "fx-hash"))]
type PersonMap<V> = std::collections::HashMap<PersonId, V>;

/// Charges population members for parking search and extra walking time
/// whenever they depart with a monitored mode from a non-excluded activity.
///
/// Per-person state lives only for one iteration and is cleared by
/// [`EventHandler::reset`]:
///
/// - the type of the last non-stage activity each person ended;
/// - the time each person last left a vehicle.
///
/// The charge itself is emitted as a [`PersonMoneyEvent`] into the
/// [`EventBuffer`], so every handler registered with the same manager
/// (including the money ledger) sees it after the departure.
pub struct ParkingCostHandler {
    config:             ParkingCostConfig,
    time_loss_seconds:  f64,
    population:         Arc<Population>,
    scoring:            Arc<ScoringConfig>,
    previous_activity:  PersonMap<String>,
    last_vehicle_leave: PersonMap<SimTime>,
    charges:            u64,
}

impl ParkingCostHandler {
    pub const NAME: &'static str = "parking-cost";

    /// Validates `config` and caches the derived time loss.
    pub fn new(
        config:     ParkingCostConfig,
        population: Arc<Population>,
        scoring:    Arc<ScoringConfig>,
    ) -> ParkingResult<Self> {
        config.validate()?;
        let time_loss_seconds = config.additional_time_loss_seconds();
        tracing::debug!(
            modes = ?config.modes,
            excluded = ?config.excluded_activity_prefixes,
            time_loss_seconds,
            "parking cost handler configured"
        );
        Ok(Self {
            config,
            time_loss_seconds,
            population,
            scoring,
            previous_activity: PersonMap::default(),
            last_vehicle_leave: PersonMap::default(),
            charges: 0,
        })
    }

    pub fn config(&self) -> &ParkingCostConfig {
        &self.config
    }

    /// Type of the last non-stage activity `person` ended this iteration.
    pub fn previous_activity(&self, person: PersonId) -> Option<&str> {
        self.previous_activity.get(&person).map(String::as_str)
    }

    /// Time `person` last left a vehicle this iteration.
    pub fn last_vehicle_leave_time(&self, person: PersonId) -> Option<SimTime> {
        self.last_vehicle_leave.get(&person).copied()
    }

    /// Charges emitted since the last reset.
    pub fn charges_emitted(&self) -> u64 {
        self.charges
    }

    // ── Event reactions ──────────────────────────────────────────────────────

    pub fn on_activity_end(&mut self, event: &ActivityEndEvent) {
        if !self.population.contains(event.person) || is_stage_activity(&event.act_type) {
            return;
        }
        self.previous_activity.insert(event.person, event.act_type.clone());
    }

    pub fn on_leaves_vehicle(&mut self, event: &PersonLeavesVehicleEvent) {
        if !self.population.contains(event.person) {
            return;
        }
        self.last_vehicle_leave.insert(event.person, event.time);
    }

    /// The charge for `event`, or `None` if the departure is free.
    pub fn on_departure(&mut self, event: &PersonDepartureEvent) -> ParkingResult<Option<PersonMoneyEvent>> {
        let Some(person) = self.population.get(event.person) else {
            return Ok(None);
        };
        if !self.config.is_monitored(event.mode) {
            tracing::trace!(person = %event.person, mode = %event.mode, "departure not monitored");
            return Ok(None);
        }

        let previous = self
            .previous_activity
            .get(&event.person)
            .ok_or(ParkingError::NoPreviousActivity(event.person))?;
        if self.config.is_excluded(previous) {
            tracing::trace!(person = %event.person, previous = %previous, "departure from excluded activity");
            return Ok(None);
        }

        let params = self.scoring.parameters_for(&person.attributes)?;
        let traveling = params.mode(event.mode)?.marginal_utility_of_traveling_utils_hr;

        let mum = match person.attributes.get(MARGINAL_UTILITY_OF_MONEY) {
            None => return Err(ParkingError::MissingMarginalUtilityOfMoney(event.person)),
            Some(value) => value.as_f64().ok_or_else(|| ParkingError::InvalidMarginalUtilityOfMoney {
                person: event.person,
                value:  value.to_string(),
            })?,
        };

        let amount = time_loss_charge(self.time_loss_seconds, params.performing_utils_hr, traveling, mum)
            .inspect_err(|_| {
                tracing::error!(person = %event.person, mode = %event.mode, mum, "invalid parking charge");
            })?;

        tracing::debug!(
            person = %event.person,
            mode = %event.mode,
            previous = %previous,
            amount,
            "parking charge"
        );
        self.charges += 1;
        Ok(Some(PersonMoneyEvent {
            time:                event.time,
            person:              event.person,
            amount,
            purpose:             charge_purpose(event.mode, previous),
            transaction_partner: TRANSACTION_PARTNER.to_owned(),
        }))
    }
}

impl EventHandler for ParkingCostHandler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn reset(&mut self, iteration: u32) {
        tracing::debug!(
            iteration,
            previous_activities = self.previous_activity.len(),
            vehicle_leaves = self.last_vehicle_leave.len(),
            charges = self.charges,
            "resetting parking cost handler"
        );
        self.previous_activity.clear();
        self.last_vehicle_leave.clear();
        self.charges = 0;
    }

    fn handle_activity_end(&mut self, event: &ActivityEndEvent, _out: &mut EventBuffer) -> HandlerResult {
        self.on_activity_end(event);
        Ok(())
    }

    fn handle_departure(&mut self, event: &PersonDepartureEvent, out: &mut EventBuffer) -> HandlerResult {
        if let Some(charge) = self.on_departure(event)? {
            out.push(charge);
        }
        Ok(())
    }

    fn handle_leaves_vehicle(&mut self, event: &PersonLeavesVehicleEvent, _out: &mut EventBuffer) -> HandlerResult {
        self.on_leaves_vehicle(event);
        Ok(())
    }
}
