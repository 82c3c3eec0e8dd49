//! Offline gazetteer
//!
//! A `DeviceGeocoder` backed by a JSON file of known addresses. Lookups return
//! the entries nearest to the query point, within a maximum distance.
//!
//! File format: a JSON array of `DeviceAddress` objects.

use crate::config::Config;
use crate::coord::{haversine_distance, Coordinates};
use crate::error::{Error, Result};
use crate::geocode::local::{DeviceAddress, DeviceGeocoder};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Default search distance in meters
pub const DEFAULT_MAX_DISTANCE_M: f64 = 500.0;

/// File-backed address lookup
#[derive(Debug, Clone)]
pub struct Gazetteer {
    entries: Vec<DeviceAddress>,
    max_distance_m: f64,
}

impl Gazetteer {
    /// Create a gazetteer from in-memory entries
    pub fn new(entries: Vec<DeviceAddress>, max_distance_m: f64) -> Self {
        Self {
            entries,
            max_distance_m,
        }
    }

    /// A gazetteer that knows no addresses
    pub fn empty() -> Self {
        Self::new(Vec::new(), DEFAULT_MAX_DISTANCE_M)
    }

    /// Load entries from a JSON file
    pub fn load(path: &Path, max_distance_m: f64) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read gazetteer {}: {}",
                path.display(),
                e
            ))
        })?;

        let entries: Vec<DeviceAddress> = serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse gazetteer {}: {}",
                path.display(),
                e
            ))
        })?;

        info!(path = %path.display(), entries = entries.len(), "Loaded gazetteer");
        Ok(Self::new(entries, max_distance_m))
    }

    /// Load the gazetteer named in the `[local]` config section
    ///
    /// An empty path gives an empty gazetteer, so every lookup succeeds with
    /// no candidates.
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.local.gazetteer.is_empty() {
            warn!("No gazetteer configured (local.gazetteer); local lookups will find nothing");
            return Ok(Self::new(Vec::new(), config.local.max_distance_m));
        }

        Self::load(Path::new(&config.local.gazetteer), config.local.max_distance_m)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::empty()
    }
}

impl DeviceGeocoder for Gazetteer {
    fn get_from_location(
        &self,
        latitude: f64,
        longitude: f64,
        max_results: usize,
    ) -> Result<Vec<DeviceAddress>> {
        let origin = Coordinates::new(latitude, longitude);

        let mut nearby: Vec<(f64, &DeviceAddress)> = self
            .entries
            .iter()
            .map(|entry| (haversine_distance(origin, entry.coordinates()), entry))
            .filter(|(distance, _)| *distance <= self.max_distance_m)
            .collect();

        nearby.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(nearby
            .into_iter()
            .take(max_results)
            .map(|(_, entry)| entry.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(line: &str, latitude: f64, longitude: f64) -> DeviceAddress {
        DeviceAddress {
            address_lines: vec![line.to_string()],
            latitude,
            longitude,
            ..Default::default()
        }
    }

    fn sample() -> Gazetteer {
        Gazetteer::new(
            vec![
                entry("far", 37.2700, 127.0563),
                entry("near", 37.2587, 127.0564),
                entry("middle", 37.2600, 127.0563),
            ],
            500.0,
        )
    }

    #[test]
    fn test_nearest_first_within_distance() {
        let found = sample().get_from_location(37.2586646, 127.0563327, 10).unwrap();
        let lines: Vec<_> = found.iter().filter_map(|a| a.first_line()).collect();
        // "far" is ~1.2km away
        assert_eq!(lines, vec!["near", "middle"]);
    }

    #[test]
    fn test_max_results_limits_output() {
        let found = sample().get_from_location(37.2586646, 127.0563327, 1).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_line(), Some("near"));
    }

    #[test]
    fn test_nothing_nearby() {
        let found = sample().get_from_location(-33.8688, 151.2093, 10).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gazetteer.json");
        let entries = vec![entry("Suwon station", 37.2660, 127.0016)];
        fs::write(&path, serde_json::to_string_pretty(&entries).unwrap()).unwrap();

        let gazetteer = Gazetteer::load(&path, 100.0).unwrap();
        assert_eq!(gazetteer.len(), 1);
        assert!(!gazetteer.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Gazetteer::load(&temp_dir.path().join("missing.json"), 100.0);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        assert!(Gazetteer::load(&path, 100.0).is_err());
    }

    #[test]
    fn test_from_config_without_path() {
        let gazetteer = Gazetteer::from_config(&Config::default()).unwrap();
        assert!(gazetteer.is_empty());
    }
}
