//! Scenario configuration and regional presets.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core_types::{CellCoord, CompassDirection, LatLng, WindVector};
use crate::error::ConfigError;

/// Static configuration for one deployment region.
///
/// Everything here is fixed for the lifetime of a session; the grid is a
/// pure function of `(config, seed)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Region label shown by consumers.
    pub name: String,
    /// Cells per side of the square lattice.
    pub grid_size: usize,
    /// Side length of one cell in kilometers.
    pub cell_size_km: f32,
    /// Geographic center the lattice is anchored to.
    pub reference: LatLng,
    /// Fallback front speed for villages the field has not reached, km/h.
    pub assumed_spread_speed_kmh: f32,
    /// Upper bound of the scrubber timeline, hours.
    pub max_horizon_hours: f32,
    /// Origin used when no selection has been handed off.
    pub default_origin: CellCoord,
    /// Prevailing wind used until the operator overrides it.
    pub default_wind: WindVector,
}

impl ScenarioConfig {
    /// The Chamoli district deployment the system ships with: a 10x10 grid
    /// of 2 km cells around the district center, prevailing pre-monsoon
    /// north-easterly at 18 km/h, default origin on the Bair Bagar flank.
    pub fn chamoli() -> Self {
        Self {
            name: "Chamoli".to_owned(),
            grid_size: 10,
            cell_size_km: 2.0,
            reference: LatLng::new(30.4167, 79.3167),
            assumed_spread_speed_kmh: 1.2,
            max_horizon_hours: 6.0,
            default_origin: CellCoord::new(5, 6),
            default_wind: WindVector::toward(CompassDirection::NorthEast, 18.0),
        }
    }

    /// Load a scenario from a JSON file.
    ///
    /// # Errors
    /// Returns `ConfigError::Load` if the file cannot be read and
    /// `ConfigError::Parse` if its contents are not a valid scenario.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::Load(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save the scenario to a JSON file.
    ///
    /// # Errors
    /// Returns `ConfigError::Save` if serialization or the write fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Save(e.to_string()))?;
        fs::write(path, contents).map_err(|e| ConfigError::Save(e.to_string()))
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::chamoli()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chamoli_preset() {
        let config = ScenarioConfig::chamoli();
        assert_eq!(config.grid_size, 10);
        assert_eq!(config.cell_size_km, 2.0);
        assert_eq!(config.default_origin, CellCoord::new(5, 6));
        assert_eq!(config.default_wind.direction_degrees, 45.0);
    }

    #[test]
    fn test_json_round_trip() {
        let config = ScenarioConfig::chamoli();
        let json = serde_json::to_string(&config).unwrap();
        let back: ScenarioConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_default_is_chamoli() {
        assert_eq!(ScenarioConfig::default(), ScenarioConfig::chamoli());
    }
}
