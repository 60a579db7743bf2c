//! Lattice construction and static risk attributes.

pub mod generator;

pub use generator::Grid;
