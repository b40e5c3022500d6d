//! Daily plans: an alternating sequence of activities and legs.
//!
//! ```text
//! home ──car──▶ car interaction ──walk──▶ shop ──car──▶ home
//!  act    leg        act (stage)     leg    act   leg    act
//! ```
//!
//! Stage activities are technical stops the router inserts where the mode
//! changes (e.g. parking the car before the walk to the door).  They are
//! never a trip purpose, which is why [`is_stage_activity`] exists: event
//! consumers that care about "where did this person come from" skip them.

use pk_core::{PersonId, SimTime, TransportMode};

use crate::{PopulationError, PopulationResult};

/// Suffix shared by every stage activity type (`"car interaction"`,
/// `"pt interaction"`, …).
pub const STAGE_ACTIVITY_SUFFIX: &str = " interaction";

/// `true` if `act_type` marks a mode transition rather than a trip purpose.
#[inline]
pub fn is_stage_activity(act_type: &str) -> bool {
    act_type.ends_with(STAGE_ACTIVITY_SUFFIX)
}

// ── PlanElement ───────────────────────────────────────────────────────────────

/// One entry of a [`Plan`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlanElement {
    /// A stay at some place.  `end_time` is `None` only for the last activity
    /// of the day (stage activities end as soon as the person arrives).
    Activity {
        act_type: String,
        end_time: Option<SimTime>,
    },
    /// Travel between two activities.  `travel_time` is in seconds.
    Leg {
        mode:        TransportMode,
        travel_time: u32,
    },
}

impl PlanElement {
    pub fn activity(act_type: impl Into<String>, end_time: Option<SimTime>) -> Self {
        PlanElement::Activity { act_type: act_type.into(), end_time }
    }

    pub fn leg(mode: TransportMode, travel_time: u32) -> Self {
        PlanElement::Leg { mode, travel_time }
    }

    pub fn is_activity(&self) -> bool {
        matches!(self, PlanElement::Activity { .. })
    }
}

// ── Plan ──────────────────────────────────────────────────────────────────────

/// A person's selected daily plan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    elements: Vec<PlanElement>,
}

impl Plan {
    pub fn new(elements: Vec<PlanElement>) -> Self {
        Self { elements }
    }

    /// A plan with no elements.  The person stays out of the event stream.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[PlanElement] {
        &self.elements
    }

    /// Number of legs in the plan.
    pub fn leg_count(&self) -> usize {
        self.elements.iter().filter(|e| !e.is_activity()).count()
    }

    /// Check the structural rules plan replay relies on:
    ///
    /// - activities and legs alternate, starting and ending with an activity;
    /// - every activity followed by a leg has an end time, except stage
    ///   activities, which end on arrival.
    ///
    /// An empty plan is valid.
    pub fn validate(&self, person: PersonId) -> PopulationResult<()> {
        let malformed = |reason| PopulationError::MalformedPlan { person, reason };

        let (Some(first), Some(last)) = (self.elements.first(), self.elements.last()) else {
            return Ok(());
        };
        if !first.is_activity() || !last.is_activity() {
            return Err(malformed("plan must start and end with an activity"));
        }

        for pair in self.elements.windows(2) {
            if pair[0].is_activity() == pair[1].is_activity() {
                return Err(malformed("activities and legs must alternate"));
            }
            if let PlanElement::Activity { act_type, end_time: None } = &pair[0] {
                if !is_stage_activity(act_type) {
                    return Err(malformed("activity before a leg needs an end time"));
                }
            }
        }
        Ok(())
    }
}
