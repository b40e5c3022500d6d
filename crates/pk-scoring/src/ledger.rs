//! `MoneyLedger`: per-person money totals for the current iteration.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use pk_core::PersonId;
use pk_events::{EventBuffer, EventHandler, HandlerResult, PersonMoneyEvent};
use pk_population::{MARGINAL_UTILITY_OF_MONEY, Population};

use crate::{ScoringConfig, ScoringError, ScoringResult};

/// Money received (positive) or paid (negative) by one person in one
/// iteration, and the utility it is worth.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PersonMoney {
    pub amount:       f64,
    pub utility:      f64,
    pub transactions: u32,
}

/// An [`EventHandler`] that sums money events per person and converts them
/// into utility.
///
/// The conversion factor is the person's `marginalUtilityOfMoney` attribute
/// when present, otherwise the value of the person's scoring parameter set.
/// A present but non-numeric attribute is an error.  Money events for agents outside the population are
/// ignored.
pub struct MoneyLedger {
    population: Arc<Population>,
    scoring:    Arc<ScoringConfig>,
    by_person:  HashMap<PersonId, PersonMoney>,
    by_purpose: BTreeMap<String, f64>,
}

impl MoneyLedger {
    pub const NAME: &'static str = "money-ledger";

    pub fn new(population: Arc<Population>, scoring: Arc<ScoringConfig>) -> Self {
        Self {
            population,
            scoring,
            by_person:  HashMap::new(),
            by_purpose: BTreeMap::new(),
        }
    }

    /// Totals for `person`, or `None` if they had no transactions.
    pub fn money(&self, person: PersonId) -> Option<&PersonMoney> {
        self.by_person.get(&person)
    }

    /// Sum of money utility over all persons.
    pub fn total_utility(&self) -> f64 {
        self.by_person.values().map(|m| m.utility).sum()
    }

    /// Sum of amounts over all persons.
    pub fn total_amount(&self) -> f64 {
        self.by_person.values().map(|m| m.amount).sum()
    }

    /// Average money utility over the whole population; persons without
    /// transactions count as zero.
    pub fn average_utility(&self) -> f64 {
        if self.population.is_empty() {
            return 0.0;
        }
        self.total_utility() / self.population.len() as f64
    }

    /// Amount per purpose string, ordered by purpose.
    pub fn amounts_by_purpose(&self) -> &BTreeMap<String, f64> {
        &self.by_purpose
    }

    fn utils_per_money(&self, person: PersonId) -> ScoringResult<Option<f64>> {
        let Some(p) = self.population.get(person) else {
            return Ok(None);
        };
        if let Some(value) = p.attributes.get(MARGINAL_UTILITY_OF_MONEY) {
            let mum = value.as_f64().ok_or_else(|| ScoringError::InvalidMarginalUtilityOfMoney {
                person,
                value: value.to_string(),
            })?;
            return Ok(Some(mum));
        }
        let params = self.scoring.parameters_for(&p.attributes)?;
        Ok(Some(params.marginal_utility_of_money))
    }
}

impl EventHandler for MoneyLedger {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn reset(&mut self, _iteration: u32) {
        self.by_person.clear();
        self.by_purpose.clear();
    }

    fn handle_money(&mut self, event: &PersonMoneyEvent, _out: &mut EventBuffer) -> HandlerResult {
        let Some(mum) = self.utils_per_money(event.person)? else {
            return Ok(());
        };
        let entry = self.by_person.entry(event.person).or_default();
        entry.amount += event.amount;
        entry.utility += event.amount * mum;
        entry.transactions += 1;
        *self.by_purpose.entry(event.purpose.clone()).or_default() += event.amount;
        Ok(())
    }
}
