//! Firewatch Core Library
//!
//! Grid-based wildfire-spread prediction for district-scale early-warning
//! deployments. Given a seeded terrain lattice, an ignition origin, wind
//! conditions and a time horizon, the engine computes the earliest simulated
//! ignition hour and burn intensity of every reachable cell, and derives
//! village ETAs, alert levels and evacuation states from the result.
//!
//! ## Determinism
//!
//! Identical `(grid, origin, wind, horizon, seed)` inputs reproduce a
//! bit-identical ignition field. All randomness flows through explicitly
//! seeded generators; there is no ambient source.

// Core types and utilities
pub mod core_types;

// Engine stages
pub mod grid;
pub mod impact;
pub mod spread;

// Session orchestration and ambient concerns
pub mod config;
pub mod error;
pub mod session;
pub mod viz;

// Re-export core types
pub use core_types::{Cell, RiskBucket, SlopeClass, VegetationClass};
pub use core_types::{CellCoord, FieldEntry, IgnitionField, IgnitionRecord};
pub use core_types::{CompassDirection, LatLng, WindVector};
pub use core_types::{AlertLevel, BurnStats, EvacuationStatus, Village, VillageStatus};

// Re-export engine entry points
pub use config::ScenarioConfig;
pub use error::{ConfigError, HandoffError, SpreadError};
pub use grid::Grid;
pub use impact::ImpactAssessor;
pub use session::{HandoffPayload, HandoffSlot, Session};
pub use spread::{compute_ignition_field, SpreadModel};
