//! Output formatters
//!
//! Provides trait-based output formatting for resolution results.

pub mod gpx;
pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::resolver::ResolutionState;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a resolution result
    ///
    /// # Arguments
    /// * `query` - The coordinate that was resolved
    /// * `state` - The state the resolution ended in
    /// * `config` - Application config (for url providers, etc.)
    fn format(&self, query: Coordinates, state: &ResolutionState, config: &Config)
        -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "json".to_string(),
            description: "Resolution state as JSON".to_string(),
        },
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable address list".to_string(),
        },
        FormatInfo {
            name: "gpx".to_string(),
            description: "GPX waypoint per address".to_string(),
        },
        FormatInfo {
            name: "url".to_string(),
            description: "Map link per address".to_string(),
        },
    ]
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::geocode::AddressRecord;
    use crate::resolver::ResolutionState;

    pub fn success() -> ResolutionState {
        ResolutionState::Success {
            records: vec![
                AddressRecord::new(
                    "123 Test St",
                    "123 Test St, Suwon-si",
                    crate::coord::Coordinates::new(37.25, 127.05),
                )
                .unwrap(),
                AddressRecord::new(
                    "Tom & Jerry's <Deli>",
                    "corner shop",
                    crate::coord::Coordinates::new(37.2587, 127.0564),
                )
                .unwrap(),
            ],
        }
    }
}
