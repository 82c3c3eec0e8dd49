//! Centralized constants for the geopin crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters (WGS84 approximation)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Valid latitude range in degrees
    pub const MAX_LATITUDE: f64 = 90.0;

    /// Valid longitude range in degrees
    pub const MAX_LONGITUDE: f64 = 180.0;
}

/// External API endpoints
pub mod api {
    /// Google Maps Platform base URL (the geocoder lives at `/geocode/json`)
    pub const GOOGLE_MAPS_API_URL: &str = "https://maps.googleapis.com/maps/api";

    /// Path of the reverse geocoding endpoint, relative to the base URL
    pub const GEOCODE_PATH: &str = "geocode/json";

    /// Status string returned by the geocoding API on success
    pub const STATUS_OK: &str = "OK";

    /// Environment variable that overrides the configured API key
    pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";
}
