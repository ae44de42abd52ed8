use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Engine coordinates are `(x, y)` in radians, longitude first.
    pub fn to_radians(&self) -> (f64, f64) {
        (self.lng.to_radians(), self.lat.to_radians())
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_to_radians_is_lng_first() {
        let (x, y) = LatLng::new(90.0, 180.0).to_radians();
        assert!((x - PI).abs() < 1e-12);
        assert!((y - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_validity() {
        assert!(LatLng::new(35.66, 139.835).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(0.0, -181.0).is_valid());
    }
}
