//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/geopin/config.toml

pub mod defaults;

use crate::constants::api::API_KEY_ENV;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for lookups
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Remote geocoder settings
    #[serde(default)]
    pub remote: RemoteConfig,

    /// On-device geocoder settings
    #[serde(default)]
    pub local: LocalConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Map link settings
    #[serde(default)]
    pub url: UrlConfig,

    /// API keys for various services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Default values for lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default geocoding backend
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Maximum candidate addresses per lookup
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Remote geocoder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// API base URL; the geocoder is served at `{base_url}/geocode/json`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Response language
    #[serde(default = "default_language")]
    pub language: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Record detail: "pretty" (full JSON dump) or "formatted" (address only)
    #[serde(default = "default_detail")]
    pub detail: String,
}

/// On-device geocoder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Path to the offline gazetteer file (empty for none)
    #[serde(default)]
    pub gazetteer: String,

    /// Maximum distance of a gazetteer match, in meters
    #[serde(default = "default_max_distance")]
    pub max_distance_m: f64,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Map link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// Google Maps Platform key for the remote geocoder
    #[serde(default)]
    pub google: String,
}

// Default value functions for serde
fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}
fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_base_url() -> String {
    DEFAULT_REMOTE_BASE_URL.to_string()
}
fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_detail() -> String {
    DEFAULT_DETAIL.to_string()
}
fn default_max_distance() -> f64 {
    DEFAULT_MAX_DISTANCE_M
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/search/?api=1&query={lat},{lng}".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map=18/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            max_results: default_max_results(),
            format: default_format(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            language: default_language(),
            timeout_secs: default_timeout(),
            detail: default_detail(),
        }
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            gazetteer: String::new(),
            max_distance_m: default_max_distance(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// The Google API key, preferring the environment over the config file
    ///
    /// Returns None when neither is set.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with_override(std::env::var(API_KEY_ENV).ok())
    }

    /// The Google API key given an override from outside the config file
    ///
    /// Empty strings count as unset on both sides.
    pub fn api_key_with_override(&self, override_key: Option<String>) -> Option<String> {
        override_key
            .filter(|key| !key.is_empty())
            .or_else(|| Some(self.api_keys.google.clone()).filter(|key| !key.is_empty()))
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "backend"] => Some(self.defaults.backend.clone()),
            ["defaults", "max_results"] => Some(self.defaults.max_results.to_string()),
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["remote", "base_url"] => Some(self.remote.base_url.clone()),
            ["remote", "language"] => Some(self.remote.language.clone()),
            ["remote", "timeout_secs"] => Some(self.remote.timeout_secs.to_string()),
            ["remote", "detail"] => Some(self.remote.detail.clone()),

            ["local", "gazetteer"] => Some(self.local.gazetteer.clone()),
            ["local", "max_distance_m"] => Some(self.local.max_distance_m.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["url", "default"] => Some(self.url.default.clone()),

            ["api_keys", "google"] => Some(self.api_keys.google.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "backend"] => {
                self.defaults.backend = value.to_string();
            }
            ["defaults", "max_results"] => {
                let max_results: usize = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid max_results value: {}", value))
                })?;
                if max_results == 0 {
                    return Err(Error::Config("max_results must be at least 1".to_string()));
                }
                self.defaults.max_results = max_results;
            }
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }

            ["remote", "base_url"] => {
                self.remote.base_url = value.to_string();
            }
            ["remote", "language"] => {
                self.remote.language = value.to_string();
            }
            ["remote", "timeout_secs"] => {
                self.remote.timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }
            ["remote", "detail"] => {
                value
                    .parse::<crate::geocode::remote::DetailStyle>()
                    .map_err(Error::Config)?;
                self.remote.detail = value.to_lowercase();
            }

            ["local", "gazetteer"] => {
                self.local.gazetteer = value.to_string();
            }
            ["local", "max_distance_m"] => {
                self.local.max_distance_m = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid distance value: {}", value))
                })?;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }

            ["api_keys", "google"] => {
                self.api_keys.google = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.backend",
            "defaults.max_results",
            "defaults.format",
            "remote.base_url",
            "remote.language",
            "remote.timeout_secs",
            "remote.detail",
            "local.gazetteer",
            "local.max_distance_m",
            "server.host",
            "server.port",
            "url.default",
            "api_keys.google",
        ]
    }

    /// Format a map URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self
            .url
            .providers
            .get(provider_name)
            .ok_or_else(|| Error::Config(format!("Unknown URL provider: {}", provider_name)))?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
