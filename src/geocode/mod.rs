//! Reverse geocoding providers
//!
//! This module defines the `GeocodeProvider` trait, the `AddressRecord` every
//! provider produces, and the backends that implement it:
//!
//! - `remote`: the Google reverse geocoding HTTP API
//! - `local`: an on-device resolver behind the `DeviceGeocoder` trait
//! - `gazetteer`: a file-backed `DeviceGeocoder` for machines without one

pub mod gazetteer;
pub mod local;
pub mod remote;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One candidate address for a resolved coordinate
///
/// Records are immutable once built. Two records are equal when their title,
/// detail and location are equal; the provider payload in `raw` does not take
/// part in the comparison.
#[derive(Debug, Clone, Serialize)]
pub struct AddressRecord {
    title: String,
    detail: String,
    location: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<serde_json::Value>,
}

impl AddressRecord {
    /// Build a record, rejecting locations outside the valid coordinate range
    pub fn new(
        title: impl Into<String>,
        detail: impl Into<String>,
        location: Coordinates,
    ) -> Result<Self> {
        location.validate()?;
        Ok(Self {
            title: title.into(),
            detail: detail.into(),
            location,
            raw: None,
        })
    }

    /// Attach the provider-specific payload
    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = Some(raw);
        self
    }

    /// Short display label
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Full human-readable detail text
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Resolved location of this candidate
    pub fn location(&self) -> Coordinates {
        self.location
    }

    /// Provider-specific payload, if the provider supplies one
    pub fn raw(&self) -> Option<&serde_json::Value> {
        self.raw.as_ref()
    }
}

impl PartialEq for AddressRecord {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.detail == other.detail && self.location == other.location
    }
}

/// Trait for reverse geocoding backends
///
/// Implementations must be thread-safe (Send + Sync) since the resolver runs
/// them on background tasks.
pub trait GeocodeProvider: Send + Sync {
    /// Returns the backend name (e.g., "remote", "local")
    fn name(&self) -> &'static str;

    /// Resolve a coordinate to at most `max_results` candidate addresses
    ///
    /// An empty list is a valid answer and is distinct from an error.
    fn resolve(
        &self,
        coordinate: Coordinates,
        max_results: usize,
    ) -> impl std::future::Future<Output = Result<Vec<AddressRecord>>> + Send;
}

/// Information about a backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendInfo {
    /// Backend name (used in config/API)
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// A backend chosen at runtime by name
#[derive(Debug)]
pub enum Backend {
    Remote(remote::RemoteBackend),
    Local(local::LocalBackend<gazetteer::Gazetteer>),
}

impl GeocodeProvider for Backend {
    fn name(&self) -> &'static str {
        match self {
            Self::Remote(backend) => backend.name(),
            Self::Local(backend) => backend.name(),
        }
    }

    async fn resolve(
        &self,
        coordinate: Coordinates,
        max_results: usize,
    ) -> Result<Vec<AddressRecord>> {
        match self {
            Self::Remote(backend) => backend.resolve(coordinate, max_results).await,
            Self::Local(backend) => backend.resolve(coordinate, max_results).await,
        }
    }
}

/// Build a backend by name from configuration
pub fn get_backend(name: &str, config: &Config) -> Result<Backend> {
    match name {
        "remote" => Ok(Backend::Remote(remote::RemoteBackend::from_config(config)?)),
        "local" => Ok(Backend::Local(local::LocalBackend::new(
            gazetteer::Gazetteer::from_config(config)?,
        ))),
        _ => Err(Error::Config(format!("Unknown backend: {}", name))),
    }
}

/// List all available backends with their info
pub fn available_backends() -> Vec<BackendInfo> {
    vec![
        BackendInfo {
            name: "remote".to_string(),
            description: "Google reverse geocoding API (requires an API key)".to_string(),
        },
        BackendInfo {
            name: "local".to_string(),
            description: "On-device resolver backed by an offline gazetteer file".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_rejects_invalid_location() {
        let result = AddressRecord::new("Nowhere", "", Coordinates::new(999.0, 0.0));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_record_equality_ignores_raw() {
        let location = Coordinates::new(37.25, 127.05);
        let plain = AddressRecord::new("123 Test St", "detail", location).unwrap();
        let with_raw = AddressRecord::new("123 Test St", "detail", location)
            .unwrap()
            .with_raw(serde_json::json!({"place_id": "abc"}));

        assert_eq!(plain, with_raw);
        assert_eq!(with_raw.raw().unwrap()["place_id"], "abc");
    }

    #[test]
    fn test_record_inequality() {
        let a = AddressRecord::new("A", "d", Coordinates::new(1.0, 1.0)).unwrap();
        let b = AddressRecord::new("A", "d", Coordinates::new(1.0, 1.5)).unwrap();
        let c = AddressRecord::new("B", "d", Coordinates::new(1.0, 1.0)).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_record_serialization_skips_missing_raw() {
        let record = AddressRecord::new("A", "d", Coordinates::new(1.0, 2.0)).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["title"], "A");
        assert_eq!(json["location"]["lng"], 2.0);
        assert!(json.get("raw").is_none());
    }

    #[test]
    fn test_get_backend_unknown() {
        let config = Config::default();
        assert!(matches!(
            get_backend("carrier-pigeon", &config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_get_backend_local_without_gazetteer() {
        let config = Config::default();
        let backend = get_backend("local", &config).unwrap();
        assert_eq!(backend.name(), "local");
    }

    #[test]
    fn test_available_backends() {
        let backends = available_backends();
        assert_eq!(backends.len(), 2);
        assert!(backends.iter().any(|b| b.name == "remote"));
        assert!(backends.iter().any(|b| b.name == "local"));
    }
}
