//! Integration tests for pk-output.

use std::sync::Arc;

use pk_core::{PersonId, SimTime, TransportMode, VehicleId};
use pk_events::{
    ActivityEndEvent, Event, EventBuffer, EventHandler, PersonDepartureEvent,
    PersonLeavesVehicleEvent, PersonMoneyEvent,
};
use pk_population::{
    Attributes, MARGINAL_UTILITY_OF_MONEY, Person, Plan, PlanElement, Population, PopulationBuilder,
};
use pk_scoring::{ScoreStats, ScoringConfig, ScoringParameterSet};
use pk_sim::{ControllerBuilder, ControllerConfig, RunConfig};
use tempfile::TempDir;

use crate::csv::{CsvEventWriter, EVENTS_FILE};
use crate::handler::EventsOutputHandler;
use crate::row::EventRow;
use crate::writer::EventWriter;
use crate::{SCORE_STATS_FILE, ScoreStatsObserver, write_score_stats_csv};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn money() -> Event {
    PersonMoneyEvent {
        time:                SimTime(3_600),
        person:              PersonId(4),
        amount:              -2.5,
        purpose:             "additionalParkingSearchAndWalkingTime_mode-car_act-shop".into(),
        transaction_partner: "fictiveTransactionPartner".into(),
    }
    .into()
}

fn departure() -> Event {
    PersonDepartureEvent { time: SimTime(60), person: PersonId(1), mode: TransportMode::Ride }.into()
}

fn records(path: &std::path::Path) -> Vec<csv::StringRecord> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records().map(|r| r.unwrap()).collect()
}

/// One car driver charged once per iteration (−4.8).
fn population() -> Arc<Population> {
    let plan = Plan::new(vec![
        PlanElement::activity("home", Some(SimTime::hms(7, 0, 0))),
        PlanElement::leg(TransportMode::Car, 900),
        PlanElement::activity("shop", Some(SimTime::hms(8, 0, 0))),
        PlanElement::leg(TransportMode::Car, 900),
        PlanElement::activity("home", None),
    ]);
    Arc::new(
        PopulationBuilder::new()
            .person(
                Person::new(PersonId(1))
                    .with_attributes(Attributes::new().with(MARGINAL_UTILITY_OF_MONEY, 0.5))
                    .with_plan(plan),
            )
            .build()
            .unwrap(),
    )
}

fn run_config(last_iteration: u32, write_events_interval: u32) -> RunConfig {
    RunConfig {
        controller: ControllerConfig { last_iteration, write_events_interval, ..Default::default() },
        parking:    Default::default(),
        scoring:    ScoringConfig::new(vec![
            ScoringParameterSet::new(None).with_mode(TransportMode::Car, -2.0),
        ])
        .unwrap(),
    }
}

/// Collects rows in memory.
#[derive(Default)]
struct MemoryWriter {
    batches:  Vec<Vec<EventRow>>,
    finishes: usize,
}

impl EventWriter for MemoryWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> crate::OutputResult<()> {
        self.batches.push(rows.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> crate::OutputResult<()> {
        self.finishes += 1;
        Ok(())
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rows {
    use super::*;

    #[test]
    fn money_row() {
        let row = EventRow::from_event(2, &money());
        assert_eq!(row.iteration, 2);
        assert_eq!(row.time, 3_600);
        assert_eq!(row.kind, "personMoney");
        assert_eq!(row.person, 4);
        assert_eq!(row.amount, Some(-2.5));
        assert_eq!(row.partner.as_deref(), Some("fictiveTransactionPartner"));
        assert_eq!(row.mode, None);
    }

    #[test]
    fn departure_row() {
        let row = EventRow::from_event(0, &departure());
        assert_eq!(row.kind, "departure");
        assert_eq!(row.mode, Some("ride"));
        assert_eq!(row.amount, None);
    }

    #[test]
    fn vehicle_row() {
        let event: Event = PersonLeavesVehicleEvent {
            time:    SimTime(10),
            person:  PersonId(3),
            vehicle: VehicleId(3),
        }
        .into();
        let row = EventRow::from_event(0, &event);
        assert_eq!(row.vehicle, Some(3));
        assert_eq!(row.act_type, None);
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use super::*;

    #[test]
    fn csv_file_created_with_header() {
        let dir = tmp();
        let mut w = CsvEventWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(EVENTS_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, EventRow::HEADER);

        let text = std::fs::read_to_string(dir.path().join(EVENTS_FILE)).unwrap();
        assert_eq!(
            text.lines().next(),
            Some("iteration,time,type,person,mode,act_type,vehicle,amount,purpose,partner")
        );
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("a").join("b");
        CsvEventWriter::new(&nested).unwrap();
        assert!(nested.join(EVENTS_FILE).exists());
    }

    #[test]
    fn csv_rows_written() {
        let dir = tmp();
        let mut w = CsvEventWriter::new(dir.path()).unwrap();
        w.write_events(&[EventRow::from_event(1, &departure()), EventRow::from_event(1, &money())])
            .unwrap();
        w.finish().unwrap();

        let rows = records(&dir.path().join(EVENTS_FILE));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "departure");
        assert_eq!(&rows[0][4], "ride");
        assert_eq!(&rows[0][7], ""); // no amount
        assert_eq!(&rows[1][7], "-2.5");
        assert_eq!(&rows[1][8], "additionalParkingSearchAndWalkingTime_mode-car_act-shop");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvEventWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── Handler ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod handler {
    use super::*;

    fn drive(h: &mut EventsOutputHandler<MemoryWriter>, iteration: u32) {
        let mut out = EventBuffer::new();
        h.reset(iteration);
        h.handle_event(&departure(), &mut out).unwrap();
        h.handle_event(&money(), &mut out).unwrap();
        h.finish_iteration(iteration).unwrap();
    }

    #[test]
    fn writes_selected_iterations_only() {
        let config = ControllerConfig { last_iteration: 5, write_events_interval: 2, ..Default::default() };
        let mut h = EventsOutputHandler::new(MemoryWriter::default(), &config);
        for it in config.iterations() {
            drive(&mut h, it);
        }
        assert_eq!(h.written(), 8);

        let w = h.into_writer();
        let iterations: Vec<u32> = w.batches.iter().map(|b| b[0].iteration).collect();
        assert_eq!(iterations, vec![0, 2, 4, 5]);
        assert_eq!(w.finishes, 1);
    }

    #[test]
    fn interval_zero_writes_nothing() {
        let config = ControllerConfig { last_iteration: 2, write_events_interval: 0, ..Default::default() };
        let mut h = EventsOutputHandler::new(MemoryWriter::default(), &config);
        for it in config.iterations() {
            drive(&mut h, it);
        }
        let w = h.into_writer();
        assert!(w.batches.is_empty());
        assert_eq!(w.finishes, 1);
    }

    #[test]
    fn through_the_controller() {
        let dir = tmp();
        let config = run_config(1, 1);
        let writer = CsvEventWriter::new(dir.path()).unwrap();
        let mut controller = ControllerBuilder::new(config.clone(), population())
            .handler(EventsOutputHandler::new(writer, &config.controller))
            .build()
            .unwrap();
        controller.run(&mut pk_sim::NoopObserver).unwrap();

        let rows = records(&dir.path().join(EVENTS_FILE));
        let charges: Vec<_> = rows.iter().filter(|r| &r[2] == "personMoney").collect();
        assert_eq!(charges.len(), 2);
        assert_eq!(&charges[0][0], "0");
        assert_eq!(&charges[1][0], "1");
        assert_eq!(&charges[0][8], "additionalParkingSearchAndWalkingTime_mode-car_act-shop");
        let amount: f64 = charges[0][7].parse().unwrap();
        assert!((amount - -4.8).abs() < 1e-12);

        // The charge directly follows the departure that caused it.
        let idx = rows.iter().position(|r| &r[2] == "personMoney").unwrap();
        assert_eq!(&rows[idx - 1][2], "departure");
    }

    #[test]
    fn output_handler_sees_activity_types() {
        let config = ControllerConfig { write_events_interval: 1, ..Default::default() };
        let mut h = EventsOutputHandler::new(MemoryWriter::default(), &config);
        let mut out = EventBuffer::new();
        h.reset(0);
        let end: Event = ActivityEndEvent { time: SimTime(0), person: PersonId(1), act_type: "home".into() }.into();
        h.handle_event(&end, &mut out).unwrap();
        h.finish_iteration(0).unwrap();
        let w = h.into_writer();
        assert_eq!(w.batches[0][0].act_type.as_deref(), Some("home"));
    }
}

// ── Score stats ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod scorestats {
    use super::*;

    #[test]
    fn file_lists_history_in_order() {
        let dir = tmp();
        let mut stats = ScoreStats::new();
        stats.record(1, -0.25);
        stats.record(0, -0.5);
        let path = write_score_stats_csv(dir.path(), &stats).unwrap();
        assert_eq!(path, dir.path().join(SCORE_STATS_FILE));

        let rows = records(&path);
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[0][1], "-0.5");
        assert_eq!(&rows[1][0], "1");
    }

    #[test]
    fn observer_writes_after_run() {
        let dir = tmp();
        let mut controller = ControllerBuilder::new(run_config(2, 0), population()).build().unwrap();
        let mut observer = ScoreStatsObserver::new(dir.path());
        controller.run(&mut observer).unwrap();
        assert!(observer.take_error().is_none());

        let rows = records(&dir.path().join(SCORE_STATS_FILE));
        assert_eq!(rows.len(), 3);
        for row in &rows {
            // −4.8 × 0.5 for the single person.
            let avg: f64 = row[1].parse().unwrap();
            assert!((avg - -2.4).abs() < 1e-12);
        }
    }

    #[test]
    fn observer_stores_first_error() {
        let dir = tmp();
        // A regular file where the directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let mut observer = ScoreStatsObserver::new(blocker.join("out"));
        let mut stats = ScoreStats::new();
        stats.record(0, 1.0);
        pk_sim::IterationObserver::on_run_end(&mut observer, &stats);
        assert!(observer.take_error().is_some());
        assert!(observer.take_error().is_none());
    }
}

// ── SQLite ────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use super::*;
    use crate::SqliteEventWriter;
    use crate::sqlite::DATABASE_FILE;

    #[test]
    fn rows_round_trip() {
        let dir = tmp();
        let mut w = SqliteEventWriter::new(dir.path()).unwrap();
        w.write_events(&[EventRow::from_event(3, &departure()), EventRow::from_event(3, &money())])
            .unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join(DATABASE_FILE)).unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM events", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 2);
        let total: f64 = conn
            .query_row("SELECT SUM(amount) FROM events WHERE type = 'personMoney'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(total, -2.5);
        let mode: Option<String> = conn
            .query_row("SELECT mode FROM events WHERE type = 'departure'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(mode.as_deref(), Some("ride"));
    }

    #[test]
    fn empty_batch_ok() {
        let dir = tmp();
        let mut w = SqliteEventWriter::new(dir.path()).unwrap();
        w.write_events(&[]).unwrap();
    }
}
