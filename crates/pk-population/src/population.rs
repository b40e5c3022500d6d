//! `Person` and `Population`.

use std::collections::BTreeMap;

use pk_core::PersonId;

use crate::{Attributes, Plan};

// ── Person ────────────────────────────────────────────────────────────────────

/// A simulated traveller with attributes and one selected plan.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    pub id:         PersonId,
    pub attributes: Attributes,
    pub plan:       Plan,
}

impl Person {
    pub fn new(id: PersonId) -> Self {
        Self { id, attributes: Attributes::new(), plan: Plan::empty() }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_plan(mut self, plan: Plan) -> Self {
        self.plan = plan;
        self
    }
}

// ── Population ────────────────────────────────────────────────────────────────

/// All simulated persons, keyed by ID.
///
/// Stored in a `BTreeMap` so iteration is in ascending `PersonId` order; plan
/// replay relies on that for deterministic event ordering.  Create via
/// [`PopulationBuilder`][crate::PopulationBuilder] or the CSV loader.
#[derive(Clone, Debug, Default)]
pub struct Population {
    persons: BTreeMap<PersonId, Person>,
}

impl Population {
    /// Membership test.  Agents outside the population (transit drivers,
    /// taxi drivers) still appear in the event stream.
    #[inline]
    pub fn contains(&self, id: PersonId) -> bool {
        self.persons.contains_key(&id)
    }

    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(&id)
    }

    pub fn get_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.persons.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Persons in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Person> + '_ {
        self.persons.values()
    }

    /// IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.persons.keys().copied()
    }

    // ── Crate-private constructor used by PopulationBuilder ───────────────

    pub(crate) fn from_map(persons: BTreeMap<PersonId, Person>) -> Self {
        Self { persons }
    }
}
