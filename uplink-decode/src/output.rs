use serde::Deserialize;
use uplink_core::Uplink;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON document per line
    #[default]
    Json,
    /// `name=value` pairs
    Text,
}

/// Render a decoded uplink as a single line, without the trailing newline.
pub fn render(
    uplink: &Uplink,
    format: OutputFormat,
    include_header: bool,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json if include_header => serde_json::to_string(uplink),
        OutputFormat::Json => serde_json::to_string(&uplink.measurements),
        OutputFormat::Text => Ok(render_text(uplink, include_header)),
    }
}

fn render_text(uplink: &Uplink, include_header: bool) -> String {
    let mut parts = Vec::with_capacity(uplink.measurements.len() + 2);
    if include_header {
        let band = uplink.header.band.name();
        if !band.is_empty() {
            parts.push(band.to_string());
        }
        parts.push(format!("mode={}", uplink.header.mode));
    }

    for measurement in &uplink.measurements {
        parts.push(format!("{}={}", measurement.name, measurement.value));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use uplink_core::{Band, Header, Measurement};

    use super::*;

    fn uplink(band: Band) -> Uplink {
        Uplink {
            header: Header { mode: 1, band },
            measurements: vec![
                Measurement::new("Bat V", 0.1),
                Measurement::new("Distance Cm", 30.0),
            ],
        }
    }

    #[test]
    fn json_with_header() {
        let line = render(&uplink(Band::Eu868), OutputFormat::Json, true).unwrap();
        assert_eq!(
            line,
            r#"{"mode":1,"band":"EU868","measurements":[{"name":"Bat V","value":0.1},{"name":"Distance Cm","value":30.0}]}"#
        );
    }

    #[test]
    fn json_measurements_only() {
        let line = render(&uplink(Band::Eu868), OutputFormat::Json, false).unwrap();
        assert_eq!(
            line,
            r#"[{"name":"Bat V","value":0.1},{"name":"Distance Cm","value":30.0}]"#
        );
    }

    #[test]
    fn text_lines() {
        let line = render(&uplink(Band::Eu868), OutputFormat::Text, true).unwrap();
        assert_eq!(line, "EU868 mode=1 Bat V=0.1 Distance Cm=30");

        let line = render(&uplink(Band::Unknown(0)), OutputFormat::Text, true).unwrap();
        assert_eq!(line, "mode=1 Bat V=0.1 Distance Cm=30");

        let line = render(&uplink(Band::Eu868), OutputFormat::Text, false).unwrap();
        assert_eq!(line, "Bat V=0.1 Distance Cm=30");
    }
}
