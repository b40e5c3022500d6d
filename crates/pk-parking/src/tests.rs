//! Unit tests for pk-parking.

use std::sync::Arc;

use pk_core::{PersonId, SimTime, TransportMode, VehicleId};
use pk_events::{
    ActivityEndEvent, Event, EventBuffer, EventHandler, EventsError, EventsManager,
    PersonDepartureEvent, PersonLeavesVehicleEvent,
};
use pk_population::{
    Attributes, MARGINAL_UTILITY_OF_MONEY, Person, Population, PopulationBuilder, SUBPOPULATION,
};
use pk_scoring::{MoneyLedger, ScoringConfig, ScoringError, ScoringParameterSet};

use crate::{
    ParkingCostConfig, ParkingCostHandler, ParkingError, TRANSACTION_PARTNER, charge_purpose,
    time_loss_charge,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn scoring() -> Arc<ScoringConfig> {
    Arc::new(
        ScoringConfig::new(vec![
            ScoringParameterSet::new(None)
                .with_performing(6.0)
                .with_mode(TransportMode::Car, -2.0)
                .with_mode(TransportMode::Ride, -1.0),
            // No ride parameters on purpose.
            ScoringParameterSet::new(Some("freight"))
                .with_performing(10.0)
                .with_mode(TransportMode::Car, 0.0),
        ])
        .unwrap(),
    )
}

/// 1: mUoM 0.5 · 2: no mUoM · 3: freight, mUoM 1.0 · 4: mUoM "lots" ·
/// 5: unknown subpopulation.
fn population() -> Arc<Population> {
    Arc::new(
        PopulationBuilder::new()
            .person(Person::new(PersonId(1)).with_attributes(
                Attributes::new().with(MARGINAL_UTILITY_OF_MONEY, 0.5),
            ))
            .person(Person::new(PersonId(2)))
            .person(Person::new(PersonId(3)).with_attributes(
                Attributes::new()
                    .with(SUBPOPULATION, "freight")
                    .with(MARGINAL_UTILITY_OF_MONEY, 1.0),
            ))
            .person(Person::new(PersonId(4)).with_attributes(
                Attributes::new().with(MARGINAL_UTILITY_OF_MONEY, "lots"),
            ))
            .person(Person::new(PersonId(5)).with_attributes(
                Attributes::new()
                    .with(SUBPOPULATION, "tourists")
                    .with(MARGINAL_UTILITY_OF_MONEY, 1.0),
            ))
            .build()
            .unwrap(),
    )
}

fn handler() -> ParkingCostHandler {
    ParkingCostHandler::new(ParkingCostConfig::default(), population(), scoring()).unwrap()
}

fn act_end(t: u32, person: u32, act_type: &str) -> ActivityEndEvent {
    ActivityEndEvent { time: SimTime(t), person: PersonId(person), act_type: act_type.into() }
}

fn departure(t: u32, person: u32, mode: TransportMode) -> PersonDepartureEvent {
    PersonDepartureEvent { time: SimTime(t), person: PersonId(person), mode }
}

fn leaves(t: u32, person: u32) -> PersonLeavesVehicleEvent {
    PersonLeavesVehicleEvent {
        time:    SimTime(t),
        person:  PersonId(person),
        vehicle: VehicleId::private_of(PersonId(person)),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

// ── Charge computation ────────────────────────────────────────────────────────

#[cfg(test)]
mod charge {
    use super::*;

    #[test]
    fn worked_example() {
        let amount = time_loss_charge(1_080.0, 6.0, -2.0, 0.5).unwrap();
        assert!(close(amount, -4.8), "got {amount}");
    }

    #[test]
    fn scales_inversely_with_marginal_utility_of_money() {
        let a = time_loss_charge(1_080.0, 6.0, -2.0, 1.0).unwrap();
        let b = time_loss_charge(1_080.0, 6.0, -2.0, 2.0).unwrap();
        assert!(close(a, 2.0 * b));
    }

    #[test]
    fn positive_travel_utility_above_performing_is_rejected() {
        let err = time_loss_charge(1_080.0, 1.0, 3.0, 1.0).unwrap_err();
        assert!(matches!(err, ParkingError::InvalidCharge { amount } if amount > 0.0));
    }

    #[test]
    fn zero_amount_is_rejected() {
        assert!(matches!(
            time_loss_charge(1_080.0, 2.0, 2.0, 1.0),
            Err(ParkingError::InvalidCharge { .. })
        ));
    }

    #[test]
    fn zero_marginal_utility_of_money_is_rejected() {
        assert!(time_loss_charge(1_080.0, 6.0, -2.0, 0.0).is_err());
    }

    #[test]
    fn purpose_format() {
        assert_eq!(
            charge_purpose(TransportMode::Car, "shop"),
            "additionalParkingSearchAndWalkingTime_mode-car_act-shop"
        );
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ParkingCostConfig::default();
        assert!(cfg.is_monitored(TransportMode::Car));
        assert!(cfg.is_monitored(TransportMode::Ride));
        assert!(!cfg.is_monitored(TransportMode::Pt));
        assert_eq!(cfg.additional_time_loss_seconds(), 1_080.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn prefix_matching() {
        let cfg = ParkingCostConfig::default();
        assert!(cfg.is_excluded("home"));
        assert!(cfg.is_excluded("home_2"));
        assert!(cfg.is_excluded("work_morning"));
        assert!(!cfg.is_excluded("shop"));
        assert!(!cfg.is_excluded("at_home"));
    }

    #[test]
    fn empty_table_uses_defaults() {
        let cfg: ParkingCostConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, ParkingCostConfig::default());
    }

    #[test]
    fn partial_table() {
        let cfg: ParkingCostConfig = toml::from_str(
            r#"
            modes = ["car"]
            parking_search_seconds = 300.0
            "#,
        )
        .unwrap();
        assert!(!cfg.is_monitored(TransportMode::Ride));
        assert_eq!(cfg.additional_time_loss_seconds(), 660.0);
        assert_eq!(cfg.excluded_activity_prefixes, vec!["home", "work"]);
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(toml::from_str::<ParkingCostConfig>("walking = 3.0").is_err());
    }

    #[test]
    fn validate_rejects_degenerate_configs() {
        let no_modes = ParkingCostConfig { modes: Default::default(), ..Default::default() };
        assert!(matches!(no_modes.validate(), Err(ParkingError::Config(_))));

        let no_time = ParkingCostConfig {
            parking_search_seconds: 0.0,
            additional_walking_seconds: 0.0,
            ..Default::default()
        };
        assert!(matches!(no_time.validate(), Err(ParkingError::Config(_))));

        let blank_prefix = ParkingCostConfig {
            excluded_activity_prefixes: vec!["home".into(), " ".into()],
            ..Default::default()
        };
        assert!(matches!(blank_prefix.validate(), Err(ParkingError::Config(_))));

        let negative = ParkingCostConfig { additional_walking_seconds: -1.0, ..Default::default() };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn handler_construction_validates() {
        let cfg = ParkingCostConfig { modes: Default::default(), ..Default::default() };
        assert!(ParkingCostHandler::new(cfg, population(), scoring()).is_err());
    }
}

// ── Handler ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod handler {
    use super::*;

    #[test]
    fn charges_departure_from_leisure() {
        let mut h = handler();
        h.on_activity_end(&act_end(100, 1, "leisure"));
        let charge = h.on_departure(&departure(100, 1, TransportMode::Car)).unwrap().unwrap();

        assert_eq!(charge.time, SimTime(100));
        assert_eq!(charge.person, PersonId(1));
        assert!(close(charge.amount, -4.8));
        assert_eq!(charge.purpose, "additionalParkingSearchAndWalkingTime_mode-car_act-leisure");
        assert_eq!(charge.transaction_partner, TRANSACTION_PARTNER);
        assert_eq!(h.charges_emitted(), 1);
    }

    #[test]
    fn ride_uses_its_own_travel_utility() {
        let mut h = handler();
        h.on_activity_end(&act_end(0, 1, "shop"));
        let charge = h.on_departure(&departure(0, 1, TransportMode::Ride)).unwrap().unwrap();
        // 0.3 h × (6 - (-1)) / 0.5
        assert!(close(charge.amount, -4.2));
        assert!(charge.purpose.ends_with("_mode-ride_act-shop"));
    }

    #[test]
    fn subpopulation_selects_parameters() {
        let mut h = handler();
        h.on_activity_end(&act_end(0, 3, "delivery"));
        let charge = h.on_departure(&departure(0, 3, TransportMode::Car)).unwrap().unwrap();
        // 0.3 h × (10 - 0) / 1.0
        assert!(close(charge.amount, -3.0));
    }

    #[test]
    fn excluded_prefixes_are_free() {
        let mut h = handler();
        for act in ["home", "home_1", "work", "work_2"] {
            h.on_activity_end(&act_end(0, 1, act));
            assert_eq!(h.on_departure(&departure(0, 1, TransportMode::Car)).unwrap(), None, "{act}");
        }
        assert_eq!(h.charges_emitted(), 0);
    }

    #[test]
    fn unmonitored_modes_are_free() {
        let mut h = handler();
        h.on_activity_end(&act_end(0, 1, "leisure"));
        for mode in [TransportMode::Pt, TransportMode::Walk, TransportMode::Bike] {
            assert_eq!(h.on_departure(&departure(0, 1, mode)).unwrap(), None);
        }
    }

    #[test]
    fn unmonitored_mode_without_previous_activity_is_fine() {
        let mut h = handler();
        assert_eq!(h.on_departure(&departure(0, 1, TransportMode::Walk)).unwrap(), None);
    }

    #[test]
    fn stage_activities_are_not_recorded() {
        let mut h = handler();
        h.on_activity_end(&act_end(0, 1, "leisure"));
        h.on_activity_end(&act_end(10, 1, "car interaction"));
        assert_eq!(h.previous_activity(PersonId(1)), Some("leisure"));

        let charge = h.on_departure(&departure(10, 1, TransportMode::Car)).unwrap().unwrap();
        assert!(charge.purpose.ends_with("_act-leisure"));
    }

    #[test]
    fn stage_activity_after_home_keeps_home() {
        let mut h = handler();
        h.on_activity_end(&act_end(0, 1, "home"));
        h.on_activity_end(&act_end(5, 1, "pt interaction"));
        assert_eq!(h.on_departure(&departure(5, 1, TransportMode::Car)).unwrap(), None);
    }

    #[test]
    fn agents_outside_population_are_ignored() {
        let mut h = handler();
        h.on_activity_end(&act_end(0, 99, "leisure"));
        h.on_leaves_vehicle(&leaves(5, 99));
        assert_eq!(h.previous_activity(PersonId(99)), None);
        assert_eq!(h.last_vehicle_leave_time(PersonId(99)), None);
        // Not even NoPreviousActivity: the agent is simply not ours.
        assert_eq!(h.on_departure(&departure(10, 99, TransportMode::Car)).unwrap(), None);
    }

    #[test]
    fn vehicle_leave_times_are_tracked() {
        let mut h = handler();
        h.on_leaves_vehicle(&leaves(500, 1));
        h.on_leaves_vehicle(&leaves(900, 1));
        assert_eq!(h.last_vehicle_leave_time(PersonId(1)), Some(SimTime(900)));
    }

    #[test]
    fn missing_marginal_utility_of_money_is_fatal() {
        let mut h = handler();
        h.on_activity_end(&act_end(0, 2, "leisure"));
        assert_eq!(
            h.on_departure(&departure(0, 2, TransportMode::Car)),
            Err(ParkingError::MissingMarginalUtilityOfMoney(PersonId(2)))
        );
        assert_eq!(h.charges_emitted(), 0);
    }

    #[test]
    fn missing_attribute_is_irrelevant_for_free_departures() {
        let mut h = handler();
        h.on_activity_end(&act_end(0, 2, "home"));
        assert_eq!(h.on_departure(&departure(0, 2, TransportMode::Car)).unwrap(), None);
    }

    #[test]
    fn non_numeric_marginal_utility_of_money_is_fatal() {
        let mut h = handler();
        h.on_activity_end(&act_end(0, 4, "leisure"));
        assert_eq!(
            h.on_departure(&departure(0, 4, TransportMode::Car)),
            Err(ParkingError::InvalidMarginalUtilityOfMoney { person: PersonId(4), value: "lots".into() })
        );
    }

    #[test]
    fn no_previous_activity_is_fatal() {
        let mut h = handler();
        assert_eq!(
            h.on_departure(&departure(0, 1, TransportMode::Car)),
            Err(ParkingError::NoPreviousActivity(PersonId(1)))
        );
    }

    #[test]
    fn unknown_subpopulation_is_fatal() {
        let mut h = handler();
        h.on_activity_end(&act_end(0, 5, "leisure"));
        assert_eq!(
            h.on_departure(&departure(0, 5, TransportMode::Car)),
            Err(ParkingError::Scoring(ScoringError::UnknownSubpopulation(Some("tourists".into()))))
        );
    }

    #[test]
    fn missing_mode_params_is_fatal() {
        let mut h = handler();
        h.on_activity_end(&act_end(0, 3, "delivery"));
        assert!(matches!(
            h.on_departure(&departure(0, 3, TransportMode::Ride)),
            Err(ParkingError::Scoring(ScoringError::MissingModeParams { mode: TransportMode::Ride, .. }))
        ));
    }

    #[test]
    fn reset_clears_state() {
        let mut h = handler();
        h.on_activity_end(&act_end(0, 1, "leisure"));
        h.on_leaves_vehicle(&leaves(0, 1));
        h.on_departure(&departure(0, 1, TransportMode::Car)).unwrap();

        EventHandler::reset(&mut h, 1);
        assert_eq!(h.previous_activity(PersonId(1)), None);
        assert_eq!(h.last_vehicle_leave_time(PersonId(1)), None);
        assert_eq!(h.charges_emitted(), 0);
        assert_eq!(
            h.on_departure(&departure(0, 1, TransportMode::Car)),
            Err(ParkingError::NoPreviousActivity(PersonId(1)))
        );
    }

    #[test]
    fn trait_callbacks_push_charge_into_buffer() {
        let mut h = handler();
        let mut out = EventBuffer::new();
        h.handle_activity_end(&act_end(0, 1, "leisure"), &mut out).unwrap();
        h.handle_departure(&departure(0, 1, TransportMode::Pt), &mut out).unwrap();
        assert!(out.is_empty());

        h.handle_departure(&departure(0, 1, TransportMode::Car), &mut out).unwrap();
        assert_eq!(out.len(), 1);
        assert!(matches!(&out.events()[0], Event::PersonMoney(m) if close(m.amount, -4.8)));
    }
}

// ── Through the events manager ────────────────────────────────────────────────

#[cfg(test)]
mod dispatch {
    use super::*;

    fn manager() -> EventsManager {
        let mut events = EventsManager::new();
        events.add_handler(handler()).unwrap();
        events.add_handler(MoneyLedger::new(population(), scoring())).unwrap();
        events
    }

    #[test]
    fn ledger_sees_the_charge() {
        let mut events = manager();
        events.reset_handlers(0);
        events.process_event(act_end(3_600, 1, "leisure")).unwrap();
        events.process_event(departure(3_600, 1, TransportMode::Car)).unwrap();
        // Departure plus the follow-up money event.
        assert_eq!(events.processed_count(), 3);

        let ledger = events.handler::<MoneyLedger>().unwrap();
        let money = ledger.money(PersonId(1)).unwrap();
        assert!(close(money.amount, -4.8));
        // Scored with the person's own factor: -4.8 × 0.5.
        assert!(close(money.utility, -2.4));
    }

    #[test]
    fn fatal_error_surfaces_with_handler_name() {
        let mut events = manager();
        events.reset_handlers(0);
        events.process_event(act_end(0, 2, "leisure")).unwrap();
        let err = events.process_event(departure(0, 2, TransportMode::Car)).unwrap_err();
        match err {
            EventsError::Handler { handler, time, .. } => {
                assert_eq!(handler, ParkingCostHandler::NAME);
                assert_eq!(time, SimTime(0));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(events.handler::<MoneyLedger>().unwrap().money(PersonId(2)).is_none());
    }

    #[test]
    fn reset_between_iterations() {
        let mut events = manager();
        events.reset_handlers(0);
        events.process_event(act_end(0, 1, "leisure")).unwrap();
        events.reset_handlers(1);
        assert_eq!(events.handler::<ParkingCostHandler>().unwrap().previous_activity(PersonId(1)), None);
    }
}
