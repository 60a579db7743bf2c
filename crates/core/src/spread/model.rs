//! Consolidated spread weighting.
//!
//! Earlier prototypes of the district system carried several near-duplicate
//! spread routines that differed only in their neighbor weight tables and
//! intensity formulas. This module replaces them with a single model whose
//! tables are injected, so callers tune weights instead of forking the
//! algorithm.

use serde::{Deserialize, Serialize};

use crate::core_types::{Cell, CellCoord, CompassDirection, WindVector};
use crate::spread::variance::edge_variance;

/// Weight tables feeding the edge delays of the spread graph.
///
/// The delay of an edge `A -> B` along compass direction `d` is
///
/// ```text
/// base_delay_hours[d] x wind.delay_multiplier(d)
///     x slope_factors[B.slope] x vegetation_factors[B.vegetation]
///     x variance(seed, A, B)
/// ```
///
/// Every factor is strictly positive, so every edge weight is too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadModel {
    /// Base traversal delay in hours, indexed by `CompassDirection::ALL`
    /// order.
    pub base_delay_hours: [f32; 8],
    /// Delay multiplier for fire entering each slope class, indexed
    /// Gentle, Moderate, Steep. Steeper runs burn in faster.
    pub slope_factors: [f32; 3],
    /// Delay multiplier for fire entering each vegetation class, indexed
    /// Pine, Oak, Mixed. Pine carries the most volatile fuel.
    pub vegetation_factors: [f32; 3],
    /// Inclusive range of the per-edge variance draw.
    pub variance_range: (f32, f32),
}

impl Default for SpreadModel {
    fn default() -> Self {
        Self {
            base_delay_hours: [1.0; 8],
            slope_factors: [1.0, 0.9, 0.8],
            vegetation_factors: [0.8, 0.9, 1.0],
            variance_range: (0.8, 1.2),
        }
    }
}

impl SpreadModel {
    /// Model with no directional, terrain or random modulation: every edge
    /// costs exactly one hour. Used for calibration runs.
    pub fn uniform() -> Self {
        Self {
            base_delay_hours: [1.0; 8],
            slope_factors: [1.0; 3],
            vegetation_factors: [1.0; 3],
            variance_range: (1.0, 1.0),
        }
    }

    /// Delay in hours for the edge entering `target` along `direction`.
    pub(crate) fn edge_delay(
        &self,
        direction: CompassDirection,
        wind: &WindVector,
        target: &Cell,
        seed: u64,
        from: CellCoord,
        to: CellCoord,
    ) -> f32 {
        let (lo, hi) = self.variance_range;
        self.base_delay_hours[direction.index()]
            * wind.delay_multiplier(direction)
            * self.slope_factors[target.slope.index()]
            * self.vegetation_factors[target.vegetation.index()]
            * edge_variance(seed, from, to, lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{LatLng, SlopeClass, VegetationClass};

    fn target(vegetation: VegetationClass, slope: SlopeClass) -> Cell {
        Cell {
            row: 4,
            col: 5,
            location: LatLng::new(30.4, 79.3),
            vegetation,
            slope,
            elevation_m: 1500.0,
            base_risk: 50.0,
            weather_risk: 30.0,
            wind_speed_kmh: 18.0,
        }
    }

    #[test]
    fn test_uniform_model_unit_delay() {
        let model = SpreadModel::uniform();
        let wind = WindVector::calm();
        let cell = target(VegetationClass::Pine, SlopeClass::Steep);
        let delay = model.edge_delay(
            CompassDirection::East,
            &wind,
            &cell,
            42,
            CellCoord::new(4, 4),
            CellCoord::new(4, 5),
        );
        assert_eq!(delay, 1.0);
    }

    #[test]
    fn test_volatile_fuel_shortens_delay() {
        let model = SpreadModel {
            variance_range: (1.0, 1.0),
            ..SpreadModel::default()
        };
        let wind = WindVector::calm();
        let from = CellCoord::new(4, 4);
        let to = CellCoord::new(4, 5);

        let pine = model.edge_delay(
            CompassDirection::East,
            &wind,
            &target(VegetationClass::Pine, SlopeClass::Gentle),
            42,
            from,
            to,
        );
        let mixed = model.edge_delay(
            CompassDirection::East,
            &wind,
            &target(VegetationClass::Mixed, SlopeClass::Gentle),
            42,
            from,
            to,
        );
        assert!(pine < mixed, "{pine} !< {mixed}");

        let steep = model.edge_delay(
            CompassDirection::East,
            &wind,
            &target(VegetationClass::Mixed, SlopeClass::Steep),
            42,
            from,
            to,
        );
        assert!(steep < mixed, "{steep} !< {mixed}");
    }

    #[test]
    fn test_default_delays_strictly_positive() {
        let model = SpreadModel::default();
        let wind = WindVector::toward(CompassDirection::NorthEast, 18.0);
        let cell = target(VegetationClass::Pine, SlopeClass::Steep);
        for direction in CompassDirection::ALL {
            for seed in 0..32 {
                let delay = model.edge_delay(
                    direction,
                    &wind,
                    &cell,
                    seed,
                    CellCoord::new(4, 4),
                    CellCoord::new(4, 5),
                );
                assert!(delay > 0.0, "delay {delay} not positive");
                assert!(delay.is_finite());
            }
        }
    }
}
