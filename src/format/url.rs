//! URL output formatter

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::OutputFormatter;
use crate::resolver::ResolutionState;

/// URL formatter - outputs a map link for each resolved address
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URLs with optional provider override
    pub fn format_with_provider(
        &self,
        state: &ResolutionState,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        match state {
            ResolutionState::Success { records } => {
                let mut output = String::new();
                for record in records {
                    let location = record.location();
                    output.push_str(&format!(
                        "{}\t{}\n",
                        record.title(),
                        config.format_url(provider, location.lat, location.lng)?
                    ));
                }
                Ok(output)
            }
            ResolutionState::Failed { reason } => Err(Error::Resolution(reason.clone())),
            _ => Err(Error::Resolution(format!(
                "Nothing to link, resolution {}",
                state.name()
            ))),
        }
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map link per address"
    }

    fn format(
        &self,
        _query: Coordinates,
        state: &ResolutionState,
        config: &Config,
    ) -> Result<String> {
        self.format_with_provider(state, config, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures;

    #[test]
    fn test_url_format_default_provider() {
        let output = UrlFormatter
            .format(Coordinates::new(0.0, 0.0), &fixtures::success(), &Config::default())
            .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("123 Test St\thttps://www.google.com/maps"));
        assert!(lines[0].ends_with("query=37.25,127.05"));
    }

    #[test]
    fn test_url_format_with_provider() {
        let output = UrlFormatter
            .format_with_provider(&fixtures::success(), &Config::default(), Some("apple"))
            .unwrap();
        assert!(output.contains("https://maps.apple.com/?ll=37.25,127.05"));
    }

    #[test]
    fn test_url_format_failed_state() {
        let state = ResolutionState::Failed {
            reason: "No results found".to_string(),
        };
        let err = UrlFormatter
            .format(Coordinates::new(0.0, 0.0), &state, &Config::default())
            .unwrap_err();
        assert!(matches!(err, Error::Resolution(ref reason) if reason == "No results found"));
    }

    #[test]
    fn test_url_format_pending_state() {
        let err = UrlFormatter
            .format(Coordinates::new(0.0, 0.0), &ResolutionState::Loading, &Config::default())
            .unwrap_err();
        assert!(matches!(err, Error::Resolution(_)));
    }
}
