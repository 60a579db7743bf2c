//! Seeded generation of the terrain lattice and its baseline risk field.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::ScenarioConfig;
use crate::core_types::{Cell, CellCoord, LatLng, SlopeClass, VegetationClass};

/// Degrees of latitude/longitude per kilometer at the deployment latitudes.
const DEGREES_PER_KM: f64 = 0.01;

/// Elevation floor of the district in meters.
const BASE_ELEVATION_M: f32 = 1200.0;

/// The immutable N x N lattice of terrain cells for one session.
///
/// A grid is a pure function of `(config, seed)`: regenerating with the
/// same inputs yields an identical lattice, which keeps every downstream
/// spread computation deterministic. No component mutates a grid after
/// generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    cell_size_km: f32,
    reference: LatLng,
    cells: Vec<Cell>,
}

impl Grid {
    /// Generate the lattice for a scenario from an explicit seed.
    ///
    /// Cells are drawn in row-major order from a single seeded generator:
    /// vegetation and slope from fixed categorical distributions, elevation
    /// uniform over the district's range, and
    /// `base_risk = clamp(random base + elevation factor + vegetation
    /// factor, 0, 100)`.
    pub fn generate(config: &ScenarioConfig, seed: u64) -> Grid {
        let size = config.grid_size.max(1);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cells = Vec::with_capacity(size * size);

        let deg_per_cell = f64::from(config.cell_size_km) * DEGREES_PER_KM;
        let half_span = deg_per_cell * size as f64 / 2.0;

        for row in 0..size {
            for col in 0..size {
                // Row 0 sits on the northern edge so that the row-1 neighbor
                // of any cell is geographically north of it.
                let lat =
                    config.reference.lat + half_span - (row as f64 + 0.5) * deg_per_cell;
                let lng =
                    config.reference.lng - half_span + (col as f64 + 0.5) * deg_per_cell;

                let veg_draw: f32 = rng.random_range(0.0..1.0);
                let vegetation = if veg_draw < 0.30 {
                    VegetationClass::Pine
                } else if veg_draw < 0.65 {
                    VegetationClass::Oak
                } else {
                    VegetationClass::Mixed
                };

                let slope_draw: f32 = rng.random_range(0.0..1.0);
                let slope = if slope_draw < 0.40 {
                    SlopeClass::Steep
                } else if slope_draw < 0.82 {
                    SlopeClass::Moderate
                } else {
                    SlopeClass::Gentle
                };

                let elevation_m = BASE_ELEVATION_M + rng.random_range(0.0..1000.0);

                let random_base: f32 = rng.random_range(30.0..70.0);
                let elevation_factor: f32 = rng.random_range(0.0..20.0);
                let vegetation_factor: f32 = rng.random_range(0.0..30.0);
                let base_risk =
                    (random_base + elevation_factor + vegetation_factor).clamp(0.0, 100.0);

                let weather_risk = rng.random_range(20.0..50.0);
                let wind_speed_kmh = rng.random_range(15.0..25.0);

                cells.push(Cell {
                    row,
                    col,
                    location: LatLng::new(lat, lng),
                    vegetation,
                    slope,
                    elevation_m,
                    base_risk,
                    weather_risk,
                    wind_speed_kmh,
                });
            }
        }

        info!(size, seed, "generated terrain grid");

        Grid {
            size,
            cell_size_km: config.cell_size_km,
            reference: config.reference,
            cells,
        }
    }

    /// Cells per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Side length of one cell in kilometers.
    pub fn cell_size_km(&self) -> f32 {
        self.cell_size_km
    }

    /// Ground area of one cell in km².
    pub fn cell_area_km2(&self) -> f32 {
        self.cell_size_km * self.cell_size_km
    }

    /// Geographic center the lattice is anchored to.
    pub fn reference(&self) -> LatLng {
        self.reference
    }

    /// Whether a coordinate lies inside the lattice.
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Cell at a coordinate, if in bounds.
    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        if self.contains(coord) {
            Some(&self.cells[coord.row * self.size + coord.col])
        } else {
            None
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell whose center is nearest to a geographic point, clamped to
    /// the lattice bounds for points outside it.
    pub fn nearest_cell(&self, point: LatLng) -> &Cell {
        let deg_per_cell = f64::from(self.cell_size_km) * DEGREES_PER_KM;
        let half_span = deg_per_cell * self.size as f64 / 2.0;
        let max_index = (self.size - 1) as f64;

        let row_f = (self.reference.lat + half_span - point.lat) / deg_per_cell - 0.5;
        let col_f = (point.lng - self.reference.lng + half_span) / deg_per_cell - 0.5;
        let row = row_f.round().clamp(0.0, max_index) as usize;
        let col = col_f.round().clamp(0.0, max_index) as usize;

        &self.cells[row * self.size + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::RiskBucket;

    fn chamoli_grid(seed: u64) -> Grid {
        Grid::generate(&ScenarioConfig::chamoli(), seed)
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(chamoli_grid(42), chamoli_grid(42));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(chamoli_grid(1), chamoli_grid(2));
    }

    #[test]
    fn test_risk_scores_in_range() {
        let grid = chamoli_grid(7);
        for cell in grid.cells() {
            assert!((0.0..=100.0).contains(&cell.base_risk));
            assert!((0.0..=100.0).contains(&cell.weather_risk));
            // Bucketing never panics and covers the whole range
            let _ = RiskBucket::from_score(cell.base_risk);
        }
    }

    #[test]
    fn test_bounds_checks() {
        let grid = chamoli_grid(7);
        assert!(grid.contains(CellCoord::new(0, 0)));
        assert!(grid.contains(CellCoord::new(9, 9)));
        assert!(!grid.contains(CellCoord::new(10, 0)));
        assert!(grid.cell(CellCoord::new(10, 3)).is_none());
        assert_eq!(grid.cells().len(), 100);
    }

    #[test]
    fn test_row_zero_is_northern_edge() {
        let grid = chamoli_grid(7);
        let north = grid.cell(CellCoord::new(0, 4)).unwrap();
        let south = grid.cell(CellCoord::new(9, 4)).unwrap();
        assert!(north.location.lat > south.location.lat);

        let west = grid.cell(CellCoord::new(4, 0)).unwrap();
        let east = grid.cell(CellCoord::new(4, 9)).unwrap();
        assert!(west.location.lng < east.location.lng);
    }

    #[test]
    fn test_nearest_cell_round_trip() {
        let grid = chamoli_grid(7);
        for coord in [
            CellCoord::new(0, 0),
            CellCoord::new(5, 6),
            CellCoord::new(9, 9),
        ] {
            let cell = grid.cell(coord).unwrap();
            let found = grid.nearest_cell(cell.location);
            assert_eq!((found.row, found.col), (coord.row, coord.col));
        }
    }

    #[test]
    fn test_nearest_cell_clamps_outside_points() {
        let grid = chamoli_grid(7);
        let far_north_west = LatLng::new(31.5, 78.0);
        let cell = grid.nearest_cell(far_north_west);
        assert_eq!((cell.row, cell.col), (0, 0));
    }
}
