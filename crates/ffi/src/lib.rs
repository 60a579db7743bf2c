//! C ABI for the Firewatch prediction engine.
//!
//! Presentation layers (map frontends, dashboards, embedded panels) drive
//! the engine through this surface: create an instance for a scenario and
//! seed, scrub the horizon or change origin/wind, then read the ignition
//! field, cell shades, village statuses and burn statistics back through
//! out-parameters.
//!
//! Conventions follow standard C error handling: every fallible function
//! returns a `FirewatchErrorCode` (0 = success) and records a
//! human-readable message retrievable with `firewatch_get_last_error()`.
//! Borrowed snapshot pointers stay valid until the next call on the same
//! instance and must never be freed by the caller.

pub mod error;
pub(crate) mod helpers;
pub mod instance;
pub mod queries;
pub mod simulation;

pub use error::FirewatchErrorCode;
pub use instance::FirewatchInstance;
pub use queries::{BurnStatsC, CellShadeC, FieldEntryC, VillageStatusC};
