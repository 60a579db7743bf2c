//! The spread engine: single-source earliest-ignition computation.
//!
//! The grid is a directed graph with up to eight Moore-neighborhood edges
//! per cell and no wraparound. The engine runs a single-source
//! shortest-path expansion from the origin with a priority queue keyed by
//! tentative ignition hour: the unvisited cell with the smallest tentative
//! hour is always expanded next, its hour and intensity freeze at that
//! moment, and its neighbors are relaxed. Cells whose tentative hour
//! exceeds the horizon are never frozen and stay absent from the field.
//!
//! The original district prototype expanded cells in plain FIFO order with
//! a single visited set, which could freeze a cell at a non-minimal hour
//! when several paths reached it. The priority-queue discipline here is a
//! deliberate correction: it restores the shortest-path monotonicity of the
//! field and makes a longer horizon a strict superset of a shorter one.

pub mod model;
mod variance;

pub use model::SpreadModel;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::core_types::{CellCoord, CompassDirection, IgnitionField, IgnitionRecord, WindVector};
use crate::error::SpreadError;
use crate::grid::Grid;

/// Lower bound on burn intensity.
pub const INTENSITY_FLOOR: f32 = 0.3;

/// Intensity lost per hour of spread from the origin.
const INTENSITY_DECAY_PER_HOUR: f32 = 0.1;

/// Burn intensity of a cell igniting at `hour`.
#[inline]
fn intensity_at(hour: f32) -> f32 {
    (1.0 - hour * INTENSITY_DECAY_PER_HOUR).max(INTENSITY_FLOOR)
}

/// Frontier entry, ordered so the binary heap pops the smallest tentative
/// hour first, with coordinate tie-breaking to keep expansion order fully
/// deterministic.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    hour: f32,
    coord: CellCoord,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap and we want the earliest hour.
        other
            .hour
            .total_cmp(&self.hour)
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

/// Compute the ignition field for an origin, wind and horizon with the
/// default weight tables.
///
/// # Errors
/// `SpreadError::InvalidOrigin` if the origin is out of bounds,
/// `SpreadError::InvalidHorizon` if the horizon is negative or non-finite,
/// `SpreadError::Computation` if an edge weight violates the model
/// contract (in which case no field is returned at all).
pub fn compute_ignition_field(
    grid: &Grid,
    origin: CellCoord,
    wind: &WindVector,
    horizon_hours: f32,
    seed: u64,
) -> Result<IgnitionField, SpreadError> {
    SpreadModel::default().compute(grid, origin, wind, horizon_hours, seed)
}

impl SpreadModel {
    /// Compute the ignition field with this model's weight tables.
    ///
    /// Identical `(grid, origin, wind, horizon, seed)` inputs yield a
    /// bit-identical field. The computation is all-or-nothing: any internal
    /// inconsistency aborts it with an error instead of a partial field.
    ///
    /// # Errors
    /// See [`compute_ignition_field`].
    pub fn compute(
        &self,
        grid: &Grid,
        origin: CellCoord,
        wind: &WindVector,
        horizon_hours: f32,
        seed: u64,
    ) -> Result<IgnitionField, SpreadError> {
        if !grid.contains(origin) {
            return Err(SpreadError::InvalidOrigin {
                row: origin.row,
                col: origin.col,
                size: grid.size(),
            });
        }
        if !horizon_hours.is_finite() || horizon_hours < 0.0 {
            return Err(SpreadError::InvalidHorizon(horizon_hours));
        }

        debug!(
            origin = %origin,
            horizon_hours,
            wind_degrees = wind.direction_degrees,
            wind_kmh = wind.speed_kmh,
            "computing ignition field"
        );

        let mut field = IgnitionField::new(origin, horizon_hours);
        let mut tentative: FxHashMap<CellCoord, f32> = FxHashMap::default();
        let mut frontier = BinaryHeap::new();

        tentative.insert(origin, 0.0);
        frontier.push(Frontier {
            hour: 0.0,
            coord: origin,
        });

        while let Some(Frontier { hour, coord }) = frontier.pop() {
            if field.contains(coord) {
                // Stale frontier entry; the cell froze at an earlier hour.
                continue;
            }
            field.freeze(
                coord,
                IgnitionRecord {
                    ignition_hour: hour,
                    intensity: intensity_at(hour),
                },
            );

            for direction in CompassDirection::ALL {
                let (dr, dc) = direction.offset();
                let Some(row) = coord.row.checked_add_signed(dr) else {
                    continue;
                };
                let Some(col) = coord.col.checked_add_signed(dc) else {
                    continue;
                };
                let next = CellCoord::new(row, col);
                let Some(target) = grid.cell(next) else {
                    continue;
                };
                if field.contains(next) {
                    continue;
                }

                let delay = self.edge_delay(direction, wind, target, seed, coord, next);
                if !delay.is_finite() || delay <= 0.0 {
                    return Err(SpreadError::Computation {
                        delay,
                        from_row: coord.row,
                        from_col: coord.col,
                        to_row: next.row,
                        to_col: next.col,
                    });
                }

                let candidate = hour + delay;
                if candidate > horizon_hours {
                    // Pruned: the cell may still be reached within the
                    // horizon along another path, but never through here.
                    continue;
                }
                let improved = tentative
                    .get(&next)
                    .is_none_or(|&best| candidate < best);
                if improved {
                    tentative.insert(next, candidate);
                    frontier.push(Frontier {
                        hour: candidate,
                        coord: next,
                    });
                }
            }
        }

        debug!(cells = field.len(), "ignition field frozen");
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;
    use approx::assert_relative_eq;

    const SEED: u64 = 42;

    fn grid_of(size: usize) -> Grid {
        let config = ScenarioConfig {
            grid_size: size,
            ..ScenarioConfig::chamoli()
        };
        Grid::generate(&config, SEED)
    }

    fn default_wind() -> WindVector {
        WindVector::toward(CompassDirection::NorthEast, 18.0)
    }

    #[test]
    fn test_origin_frozen_first() {
        let grid = grid_of(10);
        let origin = CellCoord::new(5, 6);
        let field =
            compute_ignition_field(&grid, origin, &default_wind(), 6.0, SEED).unwrap();

        let record = field.get(origin).unwrap();
        assert_eq!(record.ignition_hour, 0.0);
        assert_eq!(record.intensity, 1.0);
        assert_eq!(field.origin(), origin);
    }

    #[test]
    fn test_intensity_within_bounds() {
        let grid = grid_of(10);
        let field = compute_ignition_field(
            &grid,
            CellCoord::new(5, 6),
            &default_wind(),
            24.0,
            SEED,
        )
        .unwrap();

        for (_, record) in field.iter() {
            assert!((INTENSITY_FLOOR..=1.0).contains(&record.intensity));
            assert!(record.ignition_hour >= 0.0);
            assert!(record.ignition_hour <= 24.0);
        }
    }

    #[test]
    fn test_every_cell_has_an_earlier_neighbor() {
        // Shortest-path monotonicity: each non-origin frozen cell was
        // relaxed from some neighbor that froze no later than it did.
        let grid = grid_of(10);
        let origin = CellCoord::new(5, 6);
        let field =
            compute_ignition_field(&grid, origin, &default_wind(), 6.0, SEED).unwrap();

        for (coord, record) in field.iter() {
            if coord == origin {
                continue;
            }
            let has_predecessor = CompassDirection::ALL.iter().any(|direction| {
                let (dr, dc) = direction.offset();
                let Some(row) = coord.row.checked_add_signed(dr) else {
                    return false;
                };
                let Some(col) = coord.col.checked_add_signed(dc) else {
                    return false;
                };
                field
                    .get(CellCoord::new(row, col))
                    .is_some_and(|n| n.ignition_hour <= record.ignition_hour)
            });
            assert!(
                has_predecessor,
                "cell {coord} at {} has no earlier neighbor",
                record.ignition_hour
            );
        }
    }

    #[test]
    fn test_identical_inputs_bit_identical_output() {
        let grid = grid_of(10);
        let origin = CellCoord::new(5, 6);
        let a = compute_ignition_field(&grid, origin, &default_wind(), 6.0, SEED).unwrap();
        let b = compute_ignition_field(&grid, origin, &default_wind(), 6.0, SEED).unwrap();

        assert_eq!(a.len(), b.len());
        for (coord, record) in a.iter() {
            let other = b.get(coord).unwrap();
            assert_eq!(record.ignition_hour.to_bits(), other.ignition_hour.to_bits());
            assert_eq!(record.intensity.to_bits(), other.intensity.to_bits());
        }
    }

    #[test]
    fn test_growing_horizon_is_a_superset() {
        // No-flicker law: scrubbing the horizon forward only adds cells and
        // never changes an already-included record.
        let grid = grid_of(10);
        let origin = CellCoord::new(5, 6);
        let wind = default_wind();

        let small = compute_ignition_field(&grid, origin, &wind, 1.5, SEED).unwrap();
        let large = compute_ignition_field(&grid, origin, &wind, 4.0, SEED).unwrap();

        assert!(large.len() >= small.len());
        for (coord, record) in small.iter() {
            let grown = large.get(coord).unwrap();
            assert_eq!(record.ignition_hour.to_bits(), grown.ignition_hour.to_bits());
            assert_eq!(record.intensity.to_bits(), grown.intensity.to_bits());
        }
    }

    #[test]
    fn test_zero_horizon_contains_only_origin() {
        let grid = grid_of(10);
        let origin = CellCoord::new(5, 6);
        let field =
            compute_ignition_field(&grid, origin, &default_wind(), 0.0, SEED).unwrap();

        assert_eq!(field.len(), 1);
        let record = field.get(origin).unwrap();
        assert_eq!(record.ignition_hour, 0.0);
        assert_eq!(record.intensity, 1.0);
    }

    #[test]
    fn test_uniform_model_one_hour_reaches_first_ring() {
        // 10x10 grid, interior origin, no wind, unit delays: exactly the
        // origin plus its eight Moore neighbors fit inside one hour.
        let grid = grid_of(10);
        let origin = CellCoord::new(5, 6);
        let field = SpreadModel::uniform()
            .compute(&grid, origin, &WindVector::calm(), 1.0, SEED)
            .unwrap();

        assert_eq!(field.len(), 9);
        for (coord, record) in field.iter() {
            if coord == origin {
                continue;
            }
            assert!(record.ignition_hour > 0.0);
            assert!(record.ignition_hour <= 1.0);
            assert_relative_eq!(record.ignition_hour, 1.0);
            assert!(coord.row.abs_diff(origin.row) <= 1);
            assert!(coord.col.abs_diff(origin.col) <= 1);
        }
    }

    #[test]
    fn test_tiny_horizon_from_corner_holds_only_origin() {
        // Corner origin has just three in-bounds neighbors, and none of
        // them is reachable within 0.01 h.
        let grid = grid_of(5);
        let field = compute_ignition_field(
            &grid,
            CellCoord::new(0, 0),
            &default_wind(),
            0.01,
            SEED,
        )
        .unwrap();

        assert_eq!(field.len(), 1);
        assert!(field.contains(CellCoord::new(0, 0)));
    }

    #[test]
    fn test_downwind_ignites_before_upwind() {
        let grid = grid_of(10);
        let origin = CellCoord::new(5, 5);
        let model = SpreadModel {
            variance_range: (1.0, 1.0),
            slope_factors: [1.0; 3],
            vegetation_factors: [1.0; 3],
            ..SpreadModel::default()
        };
        let wind = WindVector::toward(CompassDirection::East, 18.0);
        let field = model.compute(&grid, origin, &wind, 6.0, SEED).unwrap();

        let east = field.get(CellCoord::new(5, 6)).unwrap();
        let west = field.get(CellCoord::new(5, 4)).unwrap();
        assert!(
            east.ignition_hour < west.ignition_hour,
            "east {} !< west {}",
            east.ignition_hour,
            west.ignition_hour
        );
    }

    #[test]
    fn test_out_of_bounds_origin_rejected() {
        let grid = grid_of(10);
        let result = compute_ignition_field(
            &grid,
            CellCoord::new(10, 3),
            &default_wind(),
            1.0,
            SEED,
        );
        assert_eq!(
            result.unwrap_err(),
            SpreadError::InvalidOrigin {
                row: 10,
                col: 3,
                size: 10
            }
        );
    }

    #[test]
    fn test_invalid_horizon_rejected() {
        let grid = grid_of(10);
        let origin = CellCoord::new(5, 6);
        let wind = default_wind();

        assert!(matches!(
            compute_ignition_field(&grid, origin, &wind, -1.0, SEED),
            Err(SpreadError::InvalidHorizon(_))
        ));
        assert!(matches!(
            compute_ignition_field(&grid, origin, &wind, f32::NAN, SEED),
            Err(SpreadError::InvalidHorizon(_))
        ));
        assert!(matches!(
            compute_ignition_field(&grid, origin, &wind, f32::INFINITY, SEED),
            Err(SpreadError::InvalidHorizon(_))
        ));
    }

    #[test]
    fn test_broken_model_aborts_without_partial_field() {
        let grid = grid_of(10);
        let model = SpreadModel {
            base_delay_hours: [-1.0; 8],
            ..SpreadModel::default()
        };
        let result = model.compute(
            &grid,
            CellCoord::new(5, 6),
            &WindVector::calm(),
            6.0,
            SEED,
        );
        assert!(matches!(result, Err(SpreadError::Computation { .. })));
    }

    #[test]
    fn test_full_burn_covers_grid_eventually() {
        let grid = grid_of(10);
        let field = compute_ignition_field(
            &grid,
            CellCoord::new(5, 6),
            &default_wind(),
            100.0,
            SEED,
        )
        .unwrap();
        assert_eq!(field.len(), 100);
    }
}
