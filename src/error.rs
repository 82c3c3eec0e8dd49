//! Error types for geopin

use thiserror::Error;

/// Main error type for geopin operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No results: {0}")]
    NoResults(String),

    #[error("Device geocoder error: {0}")]
    Device(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Resolution unavailable: {0}")]
    Resolution(String),
}

impl Error {
    /// Human-readable reason shown to the user when a resolution fails
    pub fn failure_reason(&self) -> String {
        match self {
            Self::NoResults(_) => "No results found".to_string(),
            Self::Validation(msg)
            | Self::Transport(msg)
            | Self::Parse(msg)
            | Self::Device(msg)
            | Self::Config(msg)
            | Self::Server(msg)
            | Self::Resolution(msg) => format!("Error: {}", msg),
            Self::Io(e) => format!("Error: {}", e),
            Self::Json(e) => format!("Error: {}", e),
        }
    }
}

/// Result type alias for geopin operations
pub type Result<T> = std::result::Result<T, Error>;
