//! Human-readable text output formatter

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::resolver::ResolutionState;

/// Text formatter - outputs a numbered address list
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable address list"
    }

    fn format(
        &self,
        query: Coordinates,
        state: &ResolutionState,
        _config: &Config,
    ) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("lat: {}    long: {}\n\n", query.lat, query.lng));

        match state {
            ResolutionState::Success { records } if records.is_empty() => {
                output.push_str("No addresses found for this location\n");
            }
            ResolutionState::Success { records } => {
                output.push_str(&format!("Results ({}):\n", records.len()));
                for (i, record) in records.iter().enumerate() {
                    output.push_str(&format!("  {}. {}\n", i + 1, record.title()));
                    output.push_str(&format!("     {}\n", record.location()));
                }
            }
            ResolutionState::Failed { reason } => {
                output.push_str(&format!("{}\n", reason));
            }
            ResolutionState::Idle | ResolutionState::Loading => {
                output.push_str(&format!("Resolution {}\n", state.name()));
            }
        }

        Ok(output)
    }
}
