//! Google reverse geocoding backend
//!
//! Issues `GET {base}/geocode/json?latlng=..&language=..&key=..` and maps the
//! JSON envelope to address records.
//!
//! A `status` other than `"OK"` is reported as `Error::NoResults`, including
//! `"ZERO_RESULTS"`. An `"OK"` envelope with an empty `results` array yields an
//! empty list.

use crate::config::defaults::{DEFAULT_LANGUAGE, DEFAULT_TIMEOUT_SECS};
use crate::config::Config;
use crate::constants::api::{GEOCODE_PATH, GOOGLE_MAPS_API_URL, STATUS_OK};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geocode::{AddressRecord, GeocodeProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("geopin/", env!("CARGO_PKG_VERSION"));

/// What goes into `AddressRecord::detail` for remote results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailStyle {
    /// Pretty-printed JSON of the whole result entry
    #[default]
    Pretty,
    /// The formatted address, same as the title
    Formatted,
}

impl std::str::FromStr for DetailStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "json" => Ok(Self::Pretty),
            "formatted" | "address" => Ok(Self::Formatted),
            _ => Err(format!("Unknown detail style: {}", s)),
        }
    }
}

/// Response envelope of the geocoding API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plus_code: Option<PlusCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// One element of `results`: the JSON exactly as received plus a typed view
///
/// Serializes back to `raw`, so unknown keys and explicit nulls survive at
/// every depth.
#[derive(Debug, Clone)]
pub struct GeocodeEntry {
    pub result: GeocodeResult,
    pub raw: serde_json::Value,
}

impl<'de> Deserialize<'de> for GeocodeEntry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let result = GeocodeResult::deserialize(&raw).map_err(serde::de::Error::custom)?;
        Ok(Self { result, raw })
    }
}

impl Serialize for GeocodeEntry {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.raw.serialize(serializer)
    }
}

/// Typed fields of a `results` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_components: Option<Vec<AddressComponent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plus_code: Option<PlusCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Viewport>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlusCode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compound_code: Option<String>,
    pub global_code: String,
}

/// Google reverse geocoding backend
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: reqwest::Client,
    base_url: String,
    language: String,
    api_key: String,
    detail: DetailStyle,
}

impl RemoteBackend {
    /// Create a backend against the public endpoint with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a backend with a specific request timeout
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: GOOGLE_MAPS_API_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            api_key: api_key.into(),
            detail: DetailStyle::default(),
        })
    }

    /// Create a backend from the `[remote]` and `[api_keys]` config sections
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key().ok_or_else(|| {
            Error::Config(
                "Google Maps API key not configured (set api_keys.google or GOOGLE_MAPS_API_KEY)"
                    .to_string(),
            )
        })?;
        let detail = config.remote.detail.parse().map_err(Error::Config)?;

        Ok(
            Self::with_timeout(api_key, Duration::from_secs(config.remote.timeout_secs))?
                .with_base_url(&config.remote.base_url)
                .with_language(&config.remote.language)
                .with_detail_style(detail),
        )
    }

    /// Point the backend at a different API host (e.g. a proxy)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set the response language
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    /// Choose what goes into each record's detail text
    pub fn with_detail_style(mut self, detail: DetailStyle) -> Self {
        self.detail = detail;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn request_url(&self, coordinate: Coordinates) -> String {
        format!(
            "{}/{}?latlng={}&language={}&key={}",
            self.base_url,
            GEOCODE_PATH,
            urlencoding::encode(&coordinate.to_query_pair()),
            urlencoding::encode(&self.language),
            urlencoding::encode(&self.api_key)
        )
    }

    /// Fetch and parse the raw response envelope
    pub async fn fetch(&self, coordinate: Coordinates) -> Result<GeocodeResponse> {
        debug!(%coordinate, language = %self.language, "Requesting reverse geocode");

        // Errors are stripped of their URL, which carries the API key.
        let response = self
            .client
            .get(self.request_url(coordinate))
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Geocoding request failed: {}", e.without_url())))?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "Geocoding API returned status: {}",
                response.status()
            )));
        }

        let body = response.text().await.map_err(|e| {
            Error::Transport(format!("Failed to read geocoding response: {}", e.without_url()))
        })?;

        serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("Failed to parse geocoding response: {}", e)))
    }
}

impl GeocodeProvider for RemoteBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn resolve(
        &self,
        coordinate: Coordinates,
        max_results: usize,
    ) -> Result<Vec<AddressRecord>> {
        let response = self.fetch(coordinate).await?;
        records_from_response(response, max_results, self.detail)
    }
}

/// Map an API envelope to address records
pub fn records_from_response(
    response: GeocodeResponse,
    max_results: usize,
    detail: DetailStyle,
) -> Result<Vec<AddressRecord>> {
    if response.status != STATUS_OK {
        debug!(status = %response.status, "Geocoding API reported no results");
        let message = response.error_message.unwrap_or(response.status);
        return Err(Error::NoResults(message));
    }

    let mut records = Vec::with_capacity(response.results.len().min(max_results));
    for entry in response.results.iter().take(max_results.max(1)) {
        match record_from_result(entry, detail) {
            Ok(record) => records.push(record),
            Err(e) => warn!(address = %entry.result.formatted_address, "Skipping result: {}", e),
        }
    }

    Ok(records)
}

/// Build one record from one result entry
pub fn record_from_result(entry: &GeocodeEntry, detail: DetailStyle) -> Result<AddressRecord> {
    let result = &entry.result;
    let location = Coordinates::new(result.geometry.location.lat, result.geometry.location.lng);
    let detail = match detail {
        DetailStyle::Pretty => serde_json::to_string_pretty(&entry.raw)?,
        DetailStyle::Formatted => result.formatted_address.clone(),
    };

    Ok(AddressRecord::new(result.formatted_address.clone(), detail, location)?
        .with_raw(entry.raw.clone()))
}
