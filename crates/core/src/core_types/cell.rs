//! Terrain cells and their static risk attributes.

use serde::{Deserialize, Serialize};

use super::geo::LatLng;

/// Dominant vegetation cover of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VegetationClass {
    /// Resinous conifer stands, the most volatile fuel in the district.
    Pine,
    /// Broadleaf oak forest.
    Oak,
    /// Mixed cover and scrub.
    Mixed,
}

impl VegetationClass {
    /// Stable table index (Pine, Oak, Mixed).
    pub const fn index(self) -> usize {
        match self {
            Self::Pine => 0,
            Self::Oak => 1,
            Self::Mixed => 2,
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pine => "Pine",
            Self::Oak => "Oak",
            Self::Mixed => "Mixed",
        }
    }
}

/// Slope steepness class of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlopeClass {
    /// Valley floor and terraces.
    Gentle,
    /// Typical hillside.
    Moderate,
    /// Steep ravine walls; fire runs uphill fastest here.
    Steep,
}

impl SlopeClass {
    /// Stable table index (Gentle, Moderate, Steep).
    pub const fn index(self) -> usize {
        match self {
            Self::Gentle => 0,
            Self::Moderate => 1,
            Self::Steep => 2,
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gentle => "Gentle",
            Self::Moderate => "Moderate",
            Self::Steep => "Steep",
        }
    }
}

/// Discretized risk level used uniformly for badges and cell coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskBucket {
    /// Score >= 65.
    High,
    /// Score in [40, 65).
    Moderate,
    /// Score < 40.
    Low,
}

impl RiskBucket {
    /// Bucket a continuous risk score in `[0, 100]`.
    pub fn from_score(score: f32) -> Self {
        if score >= 65.0 {
            Self::High
        } else if score >= 40.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Moderate => "MODERATE",
            Self::Low => "LOW",
        }
    }
}

/// One lattice cell with its static terrain survey attributes.
///
/// Cells are generated once per session and never mutated afterwards; the
/// spread engine reads them as shared immutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Row index in `[0, N)`, row 0 at the northern edge.
    pub row: usize,
    /// Column index in `[0, N)`, column 0 at the western edge.
    pub col: usize,
    /// Geographic position of the cell center.
    pub location: LatLng,
    /// Dominant vegetation cover.
    pub vegetation: VegetationClass,
    /// Slope steepness class.
    pub slope: SlopeClass,
    /// Elevation of the cell center in meters.
    pub elevation_m: f32,
    /// Baseline fire risk score in `[0, 100]`.
    pub base_risk: f32,
    /// Static weather contribution to risk in `[0, 100]`.
    pub weather_risk: f32,
    /// Surveyed mean wind speed over the cell in km/h (display only; the
    /// spread engine takes its wind from the live `WindVector`).
    pub wind_speed_kmh: f32,
}

impl Cell {
    /// Risk bucket of this cell's baseline score.
    pub fn risk_bucket(&self) -> RiskBucket {
        RiskBucket::from_score(self.base_risk)
    }

    /// Survey-tooltip estimate of how quickly a firebrand landing here would
    /// take hold, in minutes. Higher risk, steeper slope, more volatile
    /// vegetation and adverse weather all shorten it; floor of 15 minutes.
    pub fn predicted_ignition_minutes(&self) -> u32 {
        let base = 120.0 - self.base_risk;
        let slope = match self.slope {
            SlopeClass::Steep => -30.0,
            SlopeClass::Moderate => -10.0,
            SlopeClass::Gentle => 0.0,
        };
        let vegetation = match self.vegetation {
            VegetationClass::Pine => -20.0,
            VegetationClass::Oak => -10.0,
            VegetationClass::Mixed => 0.0,
        };
        let weather = if self.weather_risk > 50.0 { -15.0 } else { 0.0 };

        (base + slope + vegetation + weather).max(15.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(base_risk: f32, vegetation: VegetationClass, slope: SlopeClass) -> Cell {
        Cell {
            row: 0,
            col: 0,
            location: LatLng::new(30.4167, 79.3167),
            vegetation,
            slope,
            elevation_m: 1500.0,
            base_risk,
            weather_risk: 30.0,
            wind_speed_kmh: 18.0,
        }
    }

    #[test]
    fn test_risk_bucket_thresholds() {
        assert_eq!(RiskBucket::from_score(65.0), RiskBucket::High);
        assert_eq!(RiskBucket::from_score(64.9), RiskBucket::Moderate);
        assert_eq!(RiskBucket::from_score(40.0), RiskBucket::Moderate);
        assert_eq!(RiskBucket::from_score(39.9), RiskBucket::Low);
        assert_eq!(RiskBucket::from_score(0.0), RiskBucket::Low);
        assert_eq!(RiskBucket::from_score(100.0), RiskBucket::High);
    }

    #[test]
    fn test_predicted_ignition_applies_modifiers() {
        // risk 50 -> base 70 minutes, steep -30, pine -20 => 20 minutes
        let fast = cell(50.0, VegetationClass::Pine, SlopeClass::Steep);
        assert_eq!(fast.predicted_ignition_minutes(), 20);

        // risk 50, gentle mixed => the plain 70 minutes
        let slow = cell(50.0, VegetationClass::Mixed, SlopeClass::Gentle);
        assert_eq!(slow.predicted_ignition_minutes(), 70);
    }

    #[test]
    fn test_predicted_ignition_floor() {
        let mut c = cell(100.0, VegetationClass::Pine, SlopeClass::Steep);
        c.weather_risk = 80.0;
        assert_eq!(c.predicted_ignition_minutes(), 15);
    }
}
