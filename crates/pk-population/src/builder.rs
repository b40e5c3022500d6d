//! Fluent builder for [`Population`].
//!
//! # Usage
//!
//! ```rust
//! use pk_core::PersonId;
//! use pk_population::{Attributes, Person, PopulationBuilder};
//!
//! let population = PopulationBuilder::new()
//!     .person(Person::new(PersonId(1)).with_attributes(
//!         Attributes::new().with("marginalUtilityOfMoney", 0.5),
//!     ))
//!     .build()
//!     .unwrap();
//!
//! assert!(population.contains(PersonId(1)));
//! assert!(!population.contains(PersonId(2)));
//! ```

use std::collections::BTreeMap;

use pk_core::PersonId;

use crate::{Person, Population, PopulationError, PopulationResult};

/// Collects persons and validates them into a [`Population`].
#[derive(Default)]
pub struct PopulationBuilder {
    persons: Vec<Person>,
}

impl PopulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one person.
    pub fn person(mut self, person: Person) -> Self {
        self.persons.push(person);
        self
    }

    /// Add many persons.
    pub fn persons(mut self, persons: impl IntoIterator<Item = Person>) -> Self {
        self.persons.extend(persons);
        self
    }

    /// Validate plans, reject duplicate IDs, and build the population.
    pub fn build(self) -> PopulationResult<Population> {
        let mut map: BTreeMap<PersonId, Person> = BTreeMap::new();
        for person in self.persons {
            person.plan.validate(person.id)?;
            let id = person.id;
            if map.insert(id, person).is_some() {
                return Err(PopulationError::DuplicatePerson(id));
            }
        }
        tracing::debug!(persons = map.len(), "population built");
        Ok(Population::from_map(map))
    }
}
