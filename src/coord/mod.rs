//! Geographic coordinates
//!
//! The one value type every other module speaks: a latitude/longitude pair
//! with range validation and great-circle distance.

use crate::constants::geo::{EARTH_RADIUS_METERS, MAX_LATITUDE, MAX_LONGITUDE};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&self.lat) {
            return Err(Error::Validation(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&self.lng) {
            return Err(Error::Validation(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Format as the `"{lat},{lng}"` pair used by geocoding query strings
    pub fn to_query_pair(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Calculate the haversine distance between two points in meters
pub fn haversine_distance(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat * PI / 180.0;
    let lat2 = p2.lat * PI / 180.0;
    let delta_lat = (p2.lat - p1.lat) * PI / 180.0;
    let delta_lng = (p2.lng - p1.lng) * PI / 180.0;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate_in_range() {
        assert!(Coordinates::new(37.2586646, 127.0563327).validate().is_ok());
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(-90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn test_validate_out_of_range() {
        let err = Coordinates::new(999.0, 0.0).validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        assert!(Coordinates::new(0.0, 180.5).validate().is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_query_pair() {
        let coords = Coordinates::new(37.25, 127.05);
        assert_eq!(coords.to_query_pair(), "37.25,127.05");
    }

    #[test]
    fn test_haversine_same_point() {
        let p = Coordinates::new(37.5665, 126.9780);
        assert_relative_eq!(haversine_distance(p, p), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(1.0, 0.0);
        // One degree of latitude is roughly 111.2 km
        assert_relative_eq!(haversine_distance(a, b), 111_195.0, max_relative = 0.001);
    }
}
