//! Where an iteration's events come from.

use pk_events::Event;

use crate::SimResult;

/// Produces the events of one iteration, sorted by time.
///
/// [`PlanReplay`][crate::PlanReplay] derives them from the population's
/// plans; a mobility simulation would produce them from its traffic model.
pub trait EventSource {
    fn events(&mut self, iteration: u32) -> SimResult<Vec<Event>>;
}

/// A fixed event list, replayed unchanged every iteration.
impl EventSource for Vec<Event> {
    fn events(&mut self, _iteration: u32) -> SimResult<Vec<Event>> {
        Ok(self.clone())
    }
}
