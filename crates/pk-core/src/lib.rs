//! `pk-core`: foundational types shared by every `pk-*` crate.
//!
//! This crate has no `pk-*` dependencies and only `thiserror` (plus optional
//! `serde`) from the outside world.
//!
//! # What lives here
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`ids`]   | `PersonId`, `VehicleId`                           |
//! | [`time`]  | `SimTime` (whole seconds since simulation start)  |
//! | [`mode`]  | `TransportMode` enum and its string form          |
//! | [`error`] | `CoreError`, `CoreResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod ids;
pub mod mode;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{PersonId, VehicleId};
pub use mode::TransportMode;
pub use time::SimTime;
