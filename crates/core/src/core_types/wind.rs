//! Wind forcing and the Moore-neighborhood compass.

use serde::{Deserialize, Serialize};

/// Additional directional bias per km/h of wind speed.
const BIAS_PER_KMH: f32 = 0.03;

/// Cap on the directional bias so every edge delay stays strictly positive
/// even in storm winds (multipliers bounded to `[0.4, 1.6]`).
const MAX_BIAS: f32 = 0.6;

/// The eight Moore-neighborhood directions, in row-major scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassDirection {
    /// Toward row - 1, col - 1.
    NorthWest,
    /// Toward row - 1.
    North,
    /// Toward row - 1, col + 1.
    NorthEast,
    /// Toward col - 1.
    West,
    /// Toward col + 1.
    East,
    /// Toward row + 1, col - 1.
    SouthWest,
    /// Toward row + 1.
    South,
    /// Toward row + 1, col + 1.
    SouthEast,
}

impl CompassDirection {
    /// All eight directions, in the same order `index` reports.
    pub const ALL: [CompassDirection; 8] = [
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
        Self::West,
        Self::East,
        Self::SouthWest,
        Self::South,
        Self::SouthEast,
    ];

    /// Stable table index matching `ALL`.
    pub const fn index(self) -> usize {
        match self {
            Self::NorthWest => 0,
            Self::North => 1,
            Self::NorthEast => 2,
            Self::West => 3,
            Self::East => 4,
            Self::SouthWest => 5,
            Self::South => 6,
            Self::SouthEast => 7,
        }
    }

    /// Row/column offset of the neighbor in this direction. Row 0 is the
    /// northern edge of the grid, so north is row - 1.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::NorthWest => (-1, -1),
            Self::North => (-1, 0),
            Self::NorthEast => (-1, 1),
            Self::West => (0, -1),
            Self::East => (0, 1),
            Self::SouthWest => (1, -1),
            Self::South => (1, 0),
            Self::SouthEast => (1, 1),
        }
    }

    /// Compass bearing in degrees (north = 0, east = 90).
    pub const fn bearing_degrees(self) -> f32 {
        match self {
            Self::North => 0.0,
            Self::NorthEast => 45.0,
            Self::East => 90.0,
            Self::SouthEast => 135.0,
            Self::South => 180.0,
            Self::SouthWest => 225.0,
            Self::West => 270.0,
            Self::NorthWest => 315.0,
        }
    }

    /// Two-letter display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
        }
    }
}

/// Wind forcing applied to spread delays.
///
/// The direction is the bearing the wind pushes the fire *toward*: a wind of
/// 45 degrees drives the front north-east, so north-east edges see their
/// delay multiplier fall below 1 and south-west edges see it rise above 1.
/// Crosswind edges stay near 1 and calm air leaves every direction at
/// exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindVector {
    /// Bearing the wind pushes toward, degrees in `[0, 360)`.
    pub direction_degrees: f32,
    /// Wind speed in km/h, non-negative.
    pub speed_kmh: f32,
}

impl WindVector {
    /// Create a wind vector, normalizing the bearing into `[0, 360)` and
    /// clamping the speed to be non-negative.
    pub fn new(direction_degrees: f32, speed_kmh: f32) -> Self {
        Self {
            direction_degrees: direction_degrees.rem_euclid(360.0),
            speed_kmh: speed_kmh.max(0.0),
        }
    }

    /// Still air: every delay multiplier is 1.
    pub fn calm() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Wind pushing toward a compass direction.
    pub fn toward(direction: CompassDirection, speed_kmh: f32) -> Self {
        Self::new(direction.bearing_degrees(), speed_kmh)
    }

    /// Strength of the directional bias for this speed.
    fn bias(&self) -> f32 {
        (self.speed_kmh * BIAS_PER_KMH).min(MAX_BIAS)
    }

    /// Delay multiplier for an edge leaving a cell toward `direction`.
    ///
    /// Downwind edges approach `1 - bias`, upwind edges `1 + bias`; the
    /// bias cap keeps the result in `[0.4, 1.6]`, strictly positive.
    pub fn delay_multiplier(&self, direction: CompassDirection) -> f32 {
        let alignment = (direction.bearing_degrees() - self.direction_degrees)
            .to_radians()
            .cos();
        1.0 - alignment * self.bias()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_calm_wind_is_neutral() {
        let wind = WindVector::calm();
        for direction in CompassDirection::ALL {
            assert_relative_eq!(wind.delay_multiplier(direction), 1.0);
        }
    }

    #[test]
    fn test_downwind_faster_than_upwind() {
        let wind = WindVector::toward(CompassDirection::NorthEast, 18.0);
        let downwind = wind.delay_multiplier(CompassDirection::NorthEast);
        let crosswind = wind.delay_multiplier(CompassDirection::NorthWest);
        let upwind = wind.delay_multiplier(CompassDirection::SouthWest);

        assert!(downwind < crosswind, "{downwind} !< {crosswind}");
        assert!(crosswind < upwind, "{crosswind} !< {upwind}");
        assert_relative_eq!(downwind, 1.0 - 0.54, epsilon = 1e-6);
        assert_relative_eq!(upwind, 1.0 + 0.54, epsilon = 1e-6);
    }

    #[test]
    fn test_multiplier_strictly_positive_in_storm() {
        let wind = WindVector::new(90.0, 200.0);
        for direction in CompassDirection::ALL {
            let m = wind.delay_multiplier(direction);
            assert!(m >= 0.4 - 1e-6, "multiplier {m} below bound");
            assert!(m > 0.0);
        }
    }

    #[test]
    fn test_direction_normalization() {
        let wind = WindVector::new(-90.0, 10.0);
        assert_relative_eq!(wind.direction_degrees, 270.0);
        let spun = WindVector::new(450.0, 10.0);
        assert_relative_eq!(spun.direction_degrees, 90.0);
    }

    #[test]
    fn test_offsets_cover_moore_neighborhood() {
        let mut seen = std::collections::HashSet::new();
        for direction in CompassDirection::ALL {
            let (dr, dc) = direction.offset();
            assert!(dr.abs() <= 1 && dc.abs() <= 1);
            assert!((dr, dc) != (0, 0));
            seen.insert((dr, dc));
        }
        assert_eq!(seen.len(), 8);
    }
}
