//! Flat row type written by the event backends.

use pk_events::Event;

/// One event, flattened.  Columns that do not apply to the event kind are
/// `None` and written as empty cells (CSV) or `NULL` (SQLite).
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub iteration: u32,
    /// Seconds after midnight.
    pub time:      u32,
    pub kind:      &'static str,
    pub person:    u32,
    pub mode:      Option<&'static str>,
    pub act_type:  Option<String>,
    pub vehicle:   Option<u32>,
    pub amount:    Option<f64>,
    pub purpose:   Option<String>,
    pub partner:   Option<String>,
}

impl EventRow {
    pub const HEADER: [&'static str; 10] = [
        "iteration", "time", "type", "person", "mode", "act_type", "vehicle", "amount", "purpose",
        "partner",
    ];

    pub fn from_event(iteration: u32, event: &Event) -> Self {
        let mut row = Self {
            iteration,
            time:     event.time().seconds(),
            kind:     event.kind(),
            person:   event.person().0,
            mode:     None,
            act_type: None,
            vehicle:  None,
            amount:   None,
            purpose:  None,
            partner:  None,
        };
        match event {
            Event::ActivityStart(e) => row.act_type = Some(e.act_type.clone()),
            Event::ActivityEnd(e) => row.act_type = Some(e.act_type.clone()),
            Event::PersonDeparture(e) => row.mode = Some(e.mode.as_str()),
            Event::PersonArrival(e) => row.mode = Some(e.mode.as_str()),
            Event::PersonEntersVehicle(e) => row.vehicle = Some(e.vehicle.0),
            Event::PersonLeavesVehicle(e) => row.vehicle = Some(e.vehicle.0),
            Event::PersonMoney(e) => {
                row.amount = Some(e.amount);
                row.purpose = Some(e.purpose.clone());
                row.partner = Some(e.transaction_partner.clone());
            }
            _ => {}
        }
        row
    }
}
