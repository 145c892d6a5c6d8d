pub mod batch;
pub mod config;
pub mod output;

pub use batch::{BatchOptions, InputError, Summary, read_lines};
pub use config::{Config, ConfigError, DecoderConfig, InputConfig, OutputConfig};
pub use output::OutputFormat;
