//! `pk-population`: the simulated population.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`attributes`] | `Attributes`, `AttributeValue`, well-known attribute keys  |
//! | [`plan`]       | `Plan`, `PlanElement`, `is_stage_activity`                 |
//! | [`population`] | `Person`, `Population`                                     |
//! | [`builder`]    | `PopulationBuilder` (fluent construction)                  |
//! | [`loader`]     | `load_population_csv`, `load_population_reader`            |
//! | [`error`]      | `PopulationError`, `PopulationResult<T>`                   |
//!
//! Membership matters as much as content: event consumers use
//! [`Population::contains`] to tell simulated persons apart from technical
//! agents (transit and taxi drivers) that show up in the same event stream.

pub mod attributes;
pub mod builder;
pub mod error;
pub mod loader;
pub mod plan;
pub mod population;


pub use attributes::{AttributeValue, Attributes, MARGINAL_UTILITY_OF_MONEY, SUBPOPULATION};
pub use builder::PopulationBuilder;
pub use error::{PopulationError, PopulationResult};
pub use loader::{load_population_csv, load_population_reader};
pub use plan::{Plan, PlanElement, STAGE_ACTIVITY_SUFFIX, is_stage_activity};
pub use population::{Person, Population};
