use std::path::Path;

use serde::Deserialize;
use uplink_core::{Decoder, Transport, WorkMode};

use crate::output::OutputFormat;

pub const DEFAULT_LOG_FILTER: &str = "uplink_decode=info,uplink_core=info";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown work mode {0} in decoder.modes")]
    UnknownMode(u8),
    #[error("decoder.modes is empty")]
    NoModes,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub decoder: DecoderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Text encoding of each payload
    pub encoding: Transport,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Print mode and band next to the measurements
    pub include_header: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Work mode codes to register
    pub modes: Vec<u8>,
    /// Stop at the first payload that fails to decode
    pub fail_fast: bool,
}

impl Config {
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl DecoderConfig {
    /// Build a decoder registering exactly the configured modes.
    pub fn build(&self) -> Result<Decoder, ConfigError> {
        if self.modes.is_empty() {
            return Err(ConfigError::NoModes);
        }

        let modes = self
            .modes
            .iter()
            .map(|&code| WorkMode::from_code(code).ok_or(ConfigError::UnknownMode(code)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Decoder::with_modes(modes))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
            decoder: DecoderConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            include_header: true,
        }
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            modes: WorkMode::ALL.iter().map(|mode| mode.code()).collect(),
            fail_fast: false,
        }
    }
}
