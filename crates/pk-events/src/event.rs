//! Event payloads.
//!
//! Every event carries the simulation time and the person it concerns.  The
//! `kind()` labels match the names used in the event output files.

use pk_core::{PersonId, SimTime, TransportMode, VehicleId};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityStartEvent {
    pub time:     SimTime,
    pub person:   PersonId,
    pub act_type: String,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityEndEvent {
    pub time:     SimTime,
    pub person:   PersonId,
    pub act_type: String,
}

/// Start of a leg.  A single trip may contain several departures (access
/// walk, main leg, egress walk).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonDepartureEvent {
    pub time:   SimTime,
    pub person: PersonId,
    pub mode:   TransportMode,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonArrivalEvent {
    pub time:   SimTime,
    pub person: PersonId,
    pub mode:   TransportMode,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonEntersVehicleEvent {
    pub time:    SimTime,
    pub person:  PersonId,
    pub vehicle: VehicleId,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonLeavesVehicleEvent {
    pub time:    SimTime,
    pub person:  PersonId,
    pub vehicle: VehicleId,
}

/// A signed cash flow attributed to a person.  Negative amounts are charges.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonMoneyEvent {
    pub time:                SimTime,
    pub person:              PersonId,
    pub amount:              f64,
    pub purpose:             String,
    pub transaction_partner: String,
}

// ── Event ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Event {
    ActivityStart(ActivityStartEvent),
    ActivityEnd(ActivityEndEvent),
    PersonDeparture(PersonDepartureEvent),
    PersonArrival(PersonArrivalEvent),
    PersonEntersVehicle(PersonEntersVehicleEvent),
    PersonLeavesVehicle(PersonLeavesVehicleEvent),
    PersonMoney(PersonMoneyEvent),
}

impl Event {
    pub fn time(&self) -> SimTime {
        match self {
            Event::ActivityStart(e)       => e.time,
            Event::ActivityEnd(e)         => e.time,
            Event::PersonDeparture(e)     => e.time,
            Event::PersonArrival(e)       => e.time,
            Event::PersonEntersVehicle(e) => e.time,
            Event::PersonLeavesVehicle(e) => e.time,
            Event::PersonMoney(e)         => e.time,
        }
    }

    pub fn person(&self) -> PersonId {
        match self {
            Event::ActivityStart(e)       => e.person,
            Event::ActivityEnd(e)         => e.person,
            Event::PersonDeparture(e)     => e.person,
            Event::PersonArrival(e)       => e.person,
            Event::PersonEntersVehicle(e) => e.person,
            Event::PersonLeavesVehicle(e) => e.person,
            Event::PersonMoney(e)         => e.person,
        }
    }

    /// Event type label used in output files.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::ActivityStart(_)       => "actstart",
            Event::ActivityEnd(_)         => "actend",
            Event::PersonDeparture(_)     => "departure",
            Event::PersonArrival(_)       => "arrival",
            Event::PersonEntersVehicle(_) => "PersonEntersVehicle",
            Event::PersonLeavesVehicle(_) => "PersonLeavesVehicle",
            Event::PersonMoney(_)         => "personMoney",
        }
    }
}

macro_rules! impl_from_payload {
    ($($payload:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$payload> for Event {
                fn from(e: $payload) -> Event {
                    Event::$variant(e)
                }
            }
        )*
    };
}

impl_from_payload! {
    ActivityStartEvent       => ActivityStart,
    ActivityEndEvent         => ActivityEnd,
    PersonDepartureEvent     => PersonDeparture,
    PersonArrivalEvent       => PersonArrival,
    PersonEntersVehicleEvent => PersonEntersVehicle,
    PersonLeavesVehicleEvent => PersonLeavesVehicle,
    PersonMoneyEvent         => PersonMoney,
}
