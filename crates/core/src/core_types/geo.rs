//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl LatLng {
    /// Create a coordinate pair.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in kilometers (haversine).
    pub fn distance_km(&self, other: LatLng) -> f64 {
        let dlat = (other.lat - self.lat).to_radians();
        let dlng = (other.lng - self.lng).to_radians();

        let a = (dlat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (dlng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_distance() {
        let p = LatLng::new(30.4167, 79.3167);
        assert_relative_eq!(p.distance_km(p), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_known_distance() {
        // One degree of latitude is ~111 km anywhere on the globe
        let a = LatLng::new(30.0, 79.0);
        let b = LatLng::new(31.0, 79.0);
        let d = a.distance_km(b);
        assert!((d - 111.19).abs() < 0.5, "unexpected distance: {d}");
    }

    #[test]
    fn test_symmetry() {
        let a = LatLng::new(30.2833, 79.1833);
        let b = LatLng::new(30.5556, 79.5639);
        assert_relative_eq!(a.distance_km(b), b.distance_km(a), epsilon = 1e-9);
    }
}
