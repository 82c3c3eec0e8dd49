//! On-device reverse geocoding backend
//!
//! Wraps a platform address-resolution facility (`DeviceGeocoder`). The
//! facility may block, so every call runs on tokio's blocking pool.
//!
//! Unlike the remote backend, zero candidates is an empty success, not an error.

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geocode::{AddressRecord, GeocodeProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// An address candidate as the platform facility reports it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceAddress {
    #[serde(default)]
    pub address_lines: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thoroughfare: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premises: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_admin_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl DeviceAddress {
    /// First address line, if the facility reported any
    pub fn first_line(&self) -> Option<&str> {
        self.address_lines.first().map(String::as_str)
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// A platform reverse-geocode-by-coordinate primitive
///
/// Calls may block (disk, IPC, platform services); callers must not invoke
/// this from an async context directly.
pub trait DeviceGeocoder: Send + Sync + 'static {
    fn get_from_location(
        &self,
        latitude: f64,
        longitude: f64,
        max_results: usize,
    ) -> Result<Vec<DeviceAddress>>;
}

/// Reverse geocoding through an on-device facility
#[derive(Debug)]
pub struct LocalBackend<G> {
    geocoder: Arc<G>,
}

impl<G: DeviceGeocoder> LocalBackend<G> {
    pub fn new(geocoder: G) -> Self {
        Self {
            geocoder: Arc::new(geocoder),
        }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }
}

impl<G: DeviceGeocoder> GeocodeProvider for LocalBackend<G> {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn resolve(
        &self,
        coordinate: Coordinates,
        max_results: usize,
    ) -> Result<Vec<AddressRecord>> {
        let geocoder = Arc::clone(&self.geocoder);
        let max_results = max_results.max(1);

        let candidates = tokio::task::spawn_blocking(move || {
            geocoder.get_from_location(coordinate.lat, coordinate.lng, max_results)
        })
        .await
        .map_err(|e| Error::Device(format!("Device geocoder task failed: {}", e)))??;

        debug!(%coordinate, candidates = candidates.len(), "Device geocoder returned");

        Ok(candidates
            .iter()
            .take(max_results)
            .filter_map(|address| match record_from_address(address) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping device candidate: {}", e);
                    None
                }
            })
            .collect())
    }
}

/// Build a record from a device candidate
///
/// The title is the first address line; candidates without one fall back to
/// the feature name and then to the coordinates.
pub fn record_from_address(address: &DeviceAddress) -> Result<AddressRecord> {
    let location = address.coordinates();
    let title = address
        .first_line()
        .or(address.feature_name.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| location.to_string());

    AddressRecord::new(title, format_full_address(address), location)
}

/// Multi-field human-readable dump of a device candidate
///
/// Only present fields are included; entries are separated by a blank line.
pub fn format_full_address(address: &DeviceAddress) -> String {
    let mut parts = Vec::new();

    if let Some(line) = address.first_line() {
        parts.push(format!("Address line: {}", line));
    }
    parts.push(format!(
        "Coordinates: lat {} long {}",
        address.latitude, address.longitude
    ));

    let fields = [
        ("Feature name", &address.feature_name),
        ("Thoroughfare", &address.thoroughfare),
        ("Premises", &address.premises),
        ("Phone", &address.phone),
        ("URL", &address.url),
        ("Locality", &address.locality),
        ("Sub-admin area", &address.sub_admin_area),
        ("Admin area", &address.admin_area),
        ("Country", &address.country_name),
        ("Postal code", &address.postal_code),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            parts.push(format!("{}: {}", label, value));
        }
    }

    parts.join("\n\n")
}
