//! JSON output formatter

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::resolver::ResolutionState;
use serde::Serialize;

/// JSON formatter - outputs the query and final state as pretty-printed JSON
pub struct JsonFormatter;

#[derive(Serialize)]
struct Report<'a> {
    query: Coordinates,
    #[serde(flatten)]
    state: &'a ResolutionState,
}

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Resolution state as JSON"
    }

    fn format(
        &self,
        query: Coordinates,
        state: &ResolutionState,
        _config: &Config,
    ) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Report { query, state })?)
    }
}
