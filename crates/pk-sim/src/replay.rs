//! `PlanReplay`: turns selected plans into an event stream without any
//! traffic model: every leg takes exactly its planned travel time.

use std::sync::Arc;

use pk_core::{SimTime, VehicleId};
use pk_events::{
    ActivityEndEvent, ActivityStartEvent, Event, PersonArrivalEvent, PersonDepartureEvent,
    PersonEntersVehicleEvent, PersonLeavesVehicleEvent,
};
use pk_population::{Person, PlanElement, Population, is_stage_activity};

use crate::{EventSource, SimResult};

/// Replays each person's plan, independently of everybody else.
///
/// Per person the events are
///
/// ```text
/// actend(a0) → departure → [enters vehicle → leaves vehicle] → arrival
///            → actstart(a1) → actend(a1) → departure → …  → actstart(aN)
/// ```
///
/// with the vehicle pair only for network modes (the person drives their
/// private vehicle).  An activity ends at its planned end time, or on arrival
/// if the person is late or it is a stage activity.  The first activity has
/// no start event and the last one no end event.
///
/// The per-person streams are merged with a stable sort on time, so ties
/// keep person order and, within a person, plan order.
pub struct PlanReplay {
    population: Arc<Population>,
}

impl PlanReplay {
    pub fn new(population: Arc<Population>) -> Self {
        Self { population }
    }

    /// All events of one replay, sorted by time.
    pub fn replay(&self) -> Vec<Event> {
        #[cfg(not(feature = "parallel"))]
        let per_person: Vec<Vec<Event>> = self.population.iter().map(person_events).collect();

        #[cfg(feature = "parallel")]
        let per_person: Vec<Vec<Event>> = {
            use rayon::prelude::*;

            let persons: Vec<&Person> = self.population.iter().collect();
            persons.into_par_iter().map(person_events).collect()
        };

        let mut events: Vec<Event> = per_person.into_iter().flatten().collect();
        events.sort_by_key(Event::time);
        events
    }
}

impl EventSource for PlanReplay {
    fn events(&mut self, iteration: u32) -> SimResult<Vec<Event>> {
        let events = self.replay();
        tracing::debug!(iteration, events = events.len(), persons = self.population.len(), "plans replayed");
        Ok(events)
    }
}

/// The events of one person's plan, in plan order.
fn person_events(person: &Person) -> Vec<Event> {
    let id = person.id;
    let mut events = Vec::with_capacity(person.plan.len() * 3);
    let mut now = SimTime::ZERO;
    let mut first = true;

    for element in person.plan.elements() {
        match element {
            PlanElement::Activity { act_type, end_time } => {
                if !first {
                    events.push(ActivityStartEvent { time: now, person: id, act_type: act_type.clone() }.into());
                }
                first = false;
                // No end time: last of the day, or a stage activity that
                // ends on arrival.
                if let Some(end) = end_time {
                    now = now.max(*end);
                    events.push(ActivityEndEvent { time: now, person: id, act_type: act_type.clone() }.into());
                } else if is_stage_activity(act_type) {
                    events.push(ActivityEndEvent { time: now, person: id, act_type: act_type.clone() }.into());
                }
            }
            PlanElement::Leg { mode, travel_time } => {
                let mode = *mode;
                events.push(PersonDepartureEvent { time: now, person: id, mode }.into());
                let arrival = now + *travel_time;
                if mode.is_network_mode() {
                    let vehicle = VehicleId::private_of(id);
                    events.push(PersonEntersVehicleEvent { time: now, person: id, vehicle }.into());
                    events.push(PersonLeavesVehicleEvent { time: arrival, person: id, vehicle }.into());
                }
                now = arrival;
                events.push(PersonArrivalEvent { time: now, person: id, mode }.into());
            }
        }
    }
    events
}
