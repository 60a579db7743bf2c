//! Core types and utilities

pub mod cell;
pub mod geo;
pub mod ignition;
pub mod village;
pub mod wind;

pub use cell::{Cell, RiskBucket, SlopeClass, VegetationClass};
pub use geo::LatLng;
pub use ignition::{BurnStats, CellCoord, FieldEntry, IgnitionField, IgnitionRecord};
pub use village::{AlertLevel, EvacuationStatus, Village, VillageStatus};
pub use wind::{CompassDirection, WindVector};
