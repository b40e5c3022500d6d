//! Synthetic daily plans for a Los Angeles-like population: long car
//! commutes, a ride-sharing minority, thin transit use.

use pk_core::{PersonId, SimTime, TransportMode};
use pk_population::{
    Attributes, MARGINAL_UTILITY_OF_MONEY, Person, Plan, PlanElement, Population, PopulationBuilder,
    PopulationResult, SUBPOPULATION,
};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const SECONDARY: [&str; 4] = ["shop", "leisure", "education", "other"];

/// Mode shares, roughly the LA county commute split.
const MODES: [(TransportMode, f64); 5] = [
    (TransportMode::Car, 0.70),
    (TransportMode::Ride, 0.12),
    (TransportMode::Pt, 0.08),
    (TransportMode::Walk, 0.06),
    (TransportMode::Bike, 0.04),
];

fn pick_mode(rng: &mut SmallRng) -> TransportMode {
    let mut draw: f64 = rng.r#gen();
    for (mode, share) in MODES {
        if draw < share {
            return mode;
        }
        draw -= share;
    }
    TransportMode::Car
}

/// `count` persons; every tenth is a freight driver.
pub fn population(count: u32, seed: u64) -> PopulationResult<Population> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let persons = (0..count).map(|i| person(PersonId(i), &mut rng)).collect::<Vec<_>>();
    PopulationBuilder::new().persons(persons).build()
}

fn person(id: PersonId, rng: &mut SmallRng) -> Person {
    let freight = id.0 % 10 == 9;
    let mut attributes = Attributes::new().with(MARGINAL_UTILITY_OF_MONEY, rng.gen_range(0.5..2.0));
    if freight {
        attributes.insert(SUBPOPULATION, "freight");
    }
    let plan = if freight { freight_plan(rng) } else { commuter_plan(rng) };
    Person::new(id).with_attributes(attributes).with_plan(plan)
}

/// home → work → [secondary] → home, one mode for the whole tour.
fn commuter_plan(rng: &mut SmallRng) -> Plan {
    let mode = pick_mode(rng);
    let leave_home = SimTime::hms(rng.gen_range(6..9), rng.gen_range(0..60), 0);
    let commute = rng.gen_range(900..3_600);
    let work_end = leave_home + commute + rng.gen_range(7..10) * 3_600;

    let mut elements = vec![
        PlanElement::activity("home", Some(leave_home)),
        PlanElement::leg(mode, commute),
    ];
    if rng.gen_bool(0.4) {
        let secondary = *SECONDARY.choose(rng).unwrap_or(&"other");
        let hop = rng.gen_range(300..1_500);
        elements.push(PlanElement::activity("work", Some(work_end)));
        elements.push(PlanElement::leg(mode, hop));
        elements.push(PlanElement::activity(secondary, Some(work_end + hop + rng.gen_range(1_800..5_400))));
        elements.push(PlanElement::leg(mode, rng.gen_range(600..2_400)));
    } else {
        elements.push(PlanElement::activity("work", Some(work_end)));
        elements.push(PlanElement::leg(mode, commute));
    }
    elements.push(PlanElement::activity("home", None));
    Plan::new(elements)
}

/// depot → a few deliveries → depot, walking the last stretch to the door.
fn freight_plan(rng: &mut SmallRng) -> Plan {
    let mut now = SimTime::hms(5, rng.gen_range(0..60), 0);
    let mut elements = vec![PlanElement::activity("depot", Some(now))];
    for _ in 0..rng.gen_range(2..5) {
        let drive = rng.gen_range(600..2_400);
        let walk = rng.gen_range(60..300);
        now = now + drive;
        elements.push(PlanElement::leg(TransportMode::Car, drive));
        elements.push(PlanElement::activity("car interaction", None));
        now = now + walk;
        elements.push(PlanElement::leg(TransportMode::Walk, walk));
        now = now + rng.gen_range(300..900);
        elements.push(PlanElement::activity("delivery", Some(now)));
        now = now + walk;
        elements.push(PlanElement::leg(TransportMode::Walk, walk));
        elements.push(PlanElement::activity("car interaction", None));
    }
    elements.push(PlanElement::leg(TransportMode::Car, rng.gen_range(600..2_400)));
    elements.push(PlanElement::activity("depot", None));
    Plan::new(elements)
}
