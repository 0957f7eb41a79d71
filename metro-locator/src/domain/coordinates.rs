//! Geographic coordinates.

use std::fmt;

use geo::{Distance, Geodesic, Point};
use serde::{Deserialize, Serialize};

/// Metres in one statute mile.
const METRES_PER_MILE: f64 = 1609.344;

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in statute miles, measured on the
    /// WGS84 ellipsoid.
    pub fn geodesic_miles(&self, other: &Coordinates) -> f64 {
        Geodesic.distance(self.to_point(), other.to_point()).abs() / METRES_PER_MILE
    }

    fn to_point(self) -> Point<f64> {
        // geo points are (x = longitude, y = latitude)
        Point::new(self.longitude, self.latitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let union_station = Coordinates::new(38.8977, -77.0063);
        assert!(union_station.geodesic_miles(&union_station) < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinates::new(38.8977, -77.0063);
        let b = Coordinates::new(38.8983, -77.0281);
        let ab = a.geodesic_miles(&b);
        let ba = b.geodesic_miles(&a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn known_distance() {
        // Union Station to Metro Center is a little over a mile
        let union_station = Coordinates::new(38.8977, -77.0063);
        let metro_center = Coordinates::new(38.8983, -77.0281);
        let miles = union_station.geodesic_miles(&metro_center);
        assert!(miles > 1.1 && miles < 1.3, "got {miles}");
    }

    #[test]
    fn one_degree_of_latitude() {
        // Roughly 69 miles per degree of latitude near the equator
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(1.0, 0.0);
        let miles = a.geodesic_miles(&b);
        assert!(miles > 68.0 && miles < 70.0, "got {miles}");
    }

    #[test]
    fn display() {
        let c = Coordinates::new(38.5, -77.25);
        assert_eq!(c.to_string(), "(38.5, -77.25)");
    }
}
