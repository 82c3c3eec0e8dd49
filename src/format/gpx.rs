//! GPX output formatter

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::resolver::ResolutionState;

/// GPX formatter - outputs the query point and one waypoint per address
pub struct GpxFormatter;

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint per address"
    }

    fn format(
        &self,
        query: Coordinates,
        state: &ResolutionState,
        _config: &Config,
    ) -> Result<String> {
        let mut gpx = String::new();

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="geopin">"#);
        gpx.push('\n');

        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!(
            "    <name>geopin reverse geocode {}</name>\n",
            query
        ));
        gpx.push_str("  </metadata>\n");

        gpx.push_str(&format!(
            r#"  <wpt lat="{}" lon="{}">"#,
            query.lat, query.lng
        ));
        gpx.push('\n');
        gpx.push_str("    <name>Pin</name>\n");
        gpx.push_str("    <sym>pin</sym>\n");
        gpx.push_str("  </wpt>\n");

        for record in state.records().unwrap_or_default() {
            let location = record.location();
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                location.lat, location.lng
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(record.title())));
            gpx.push_str(&format!("    <desc>{}</desc>\n", escape_xml(record.detail())));
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures;

    #[test]
    fn test_gpx_format() {
        let output = GpxFormatter
            .format(
                Coordinates::new(37.2586646, 127.0563327),
                &fixtures::success(),
                &Config::default(),
            )
            .unwrap();

        assert!(output.contains(r#"<?xml version="1.0""#));
        assert!(output.contains(r#"<wpt lat="37.2586646" lon="127.0563327">"#));
        assert!(output.contains(r#"<wpt lat="37.25" lon="127.05">"#));
        assert!(output.contains("<name>123 Test St</name>"));
        assert!(output.contains("</gpx>"));
        assert_eq!(output.matches("<wpt").count(), 3);
    }

    #[test]
    fn test_gpx_escapes_titles() {
        let output = GpxFormatter
            .format(Coordinates::new(0.0, 0.0), &fixtures::success(), &Config::default())
            .unwrap();
        assert!(output.contains("<name>Tom &amp; Jerry&apos;s &lt;Deli&gt;</name>"));
    }

    #[test]
    fn test_gpx_failed_state_has_only_pin() {
        let state = ResolutionState::Failed {
            reason: "No results found".to_string(),
        };
        let output = GpxFormatter
            .format(Coordinates::new(0.0, 0.0), &state, &Config::default())
            .unwrap();
        assert_eq!(output.matches("<wpt").count(), 1);
    }
}
