//! CSV population loader.
//!
//! Two files describe a population: one row per person, and one row per plan
//! element.
//!
//! # Persons CSV
//!
//! ```csv
//! person_id,subpopulation,marginal_utility_of_money
//! 1,person,0.5
//! 2,,1.2
//! 3,freight,
//! ```
//!
//! Empty cells mean "attribute absent".  A missing marginal utility of money
//! is accepted here and only becomes an error for consumers that need it.
//!
//! # Plans CSV
//!
//! ```csv
//! person_id,seq,element,type,end_time,travel_time
//! 1,0,act,home,07:30:00,
//! 1,1,leg,car,,1200
//! 1,2,act,shop,09:00:00,
//! 1,3,leg,car,,1200
//! 1,4,act,home,,
//! ```
//!
//! For `act` rows `type` is the activity type and `end_time` is optional
//! (seconds or `HH:MM:SS`).  For `leg` rows `type` is the mode and
//! `travel_time` (seconds) is required.  Rows may appear in any order; they
//! are sorted by `seq` per person.  Persons without plan rows get an empty
//! plan.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use pk_core::{PersonId, SimTime, TransportMode};

use crate::{
    Attributes, MARGINAL_UTILITY_OF_MONEY, Person, Plan, PlanElement, Population,
    PopulationBuilder, PopulationError, PopulationResult, SUBPOPULATION,
};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PersonRecord {
    person_id:                 u32,
    subpopulation:             Option<String>,
    marginal_utility_of_money: Option<f64>,
}

#[derive(Deserialize)]
struct PlanRecord {
    person_id:   u32,
    seq:         u32,
    element:     String,
    #[serde(rename = "type")]
    kind:        String,
    end_time:    Option<String>,
    travel_time: Option<u32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a population from a persons CSV and a plans CSV.
pub fn load_population_csv(persons: &Path, plans: &Path) -> PopulationResult<Population> {
    let persons_file = std::fs::File::open(persons)?;
    let plans_file = std::fs::File::open(plans)?;
    let population = load_population_reader(persons_file, plans_file)?;
    tracing::info!(
        persons = population.len(),
        path = %persons.display(),
        "loaded population"
    );
    Ok(population)
}

/// Like [`load_population_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded scenarios.
pub fn load_population_reader<P: Read, L: Read>(
    persons: P,
    plans:   L,
) -> PopulationResult<Population> {
    // ── Parse plan rows, grouped by person ────────────────────────────────
    let mut plan_rows: HashMap<u32, Vec<PlanRecord>> = HashMap::new();
    let mut plan_reader = csv::Reader::from_reader(plans);
    for result in plan_reader.deserialize::<PlanRecord>() {
        let row = result.map_err(|e| PopulationError::Parse(e.to_string()))?;
        plan_rows.entry(row.person_id).or_default().push(row);
    }

    // ── Parse persons and attach plans ────────────────────────────────────
    let mut builder = PopulationBuilder::new();
    let mut person_reader = csv::Reader::from_reader(persons);
    for result in person_reader.deserialize::<PersonRecord>() {
        let row = result.map_err(|e| PopulationError::Parse(e.to_string()))?;

        let mut attributes = Attributes::new();
        if let Some(sub) = row.subpopulation.filter(|s| !s.trim().is_empty()) {
            attributes.insert(SUBPOPULATION, sub.trim());
        }
        if let Some(mum) = row.marginal_utility_of_money {
            attributes.insert(MARGINAL_UTILITY_OF_MONEY, mum);
        }

        let plan = match plan_rows.remove(&row.person_id) {
            None => Plan::empty(),
            Some(rows) => build_plan(rows)?,
        };

        builder = builder.person(
            Person::new(PersonId(row.person_id))
                .with_attributes(attributes)
                .with_plan(plan),
        );
    }

    if let Some(orphan) = plan_rows.keys().min() {
        return Err(PopulationError::Parse(format!(
            "plan rows reference unknown person {orphan}"
        )));
    }

    builder.build()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build_plan(mut rows: Vec<PlanRecord>) -> PopulationResult<Plan> {
    rows.sort_by_key(|r| r.seq);
    let elements = rows
        .into_iter()
        .map(parse_element)
        .collect::<PopulationResult<Vec<_>>>()?;
    Ok(Plan::new(elements))
}

fn parse_element(row: PlanRecord) -> PopulationResult<PlanElement> {
    match row.element.trim() {
        "act" => {
            let end_time = row
                .end_time
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| s.parse::<SimTime>())
                .transpose()?;
            Ok(PlanElement::activity(row.kind.trim(), end_time))
        }
        "leg" => {
            let mode: TransportMode = row.kind.parse()?;
            let travel_time = row.travel_time.ok_or_else(|| {
                PopulationError::Parse(format!(
                    "leg {} of person {} has no travel_time",
                    row.seq, row.person_id
                ))
            })?;
            Ok(PlanElement::leg(mode, travel_time))
        }
        other => Err(PopulationError::Parse(format!(
            "invalid element {other:?}: expected \"act\" or \"leg\""
        ))),
    }
}
