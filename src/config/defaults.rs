//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default geocoding backend
pub const DEFAULT_BACKEND: &str = "remote";

/// Default maximum number of candidate addresses per lookup
pub const DEFAULT_MAX_RESULTS: usize = crate::resolver::DEFAULT_MAX_RESULTS;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default reverse geocoding API base URL
pub const DEFAULT_REMOTE_BASE_URL: &str = crate::constants::api::GOOGLE_MAPS_API_URL;

/// Default response language for the remote geocoder
pub const DEFAULT_LANGUAGE: &str = "ko";

/// Default HTTP timeout for the remote geocoder, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default detail style for remote results ("pretty" or "formatted")
pub const DEFAULT_DETAIL: &str = "pretty";

/// Default search distance for the offline gazetteer, in meters
pub const DEFAULT_MAX_DISTANCE_M: f64 = crate::geocode::gazetteer::DEFAULT_MAX_DISTANCE_M;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "google";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "geopin";
