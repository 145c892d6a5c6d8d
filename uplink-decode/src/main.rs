use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::eyre;
use tracing::{info, warn};
use uplink_core::Transport;
use uplink_decode::{BatchOptions, Config, OutputFormat, batch, read_lines};

#[derive(Parser)]
#[command(name = "uplink-decode")]
#[command(about = "Decode work-mode sensor uplinks into named measurements")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "uplink-decode.toml")]
    config: PathBuf,

    /// Payload text encoding (base64 or hex), overrides the config file
    #[arg(short, long)]
    encoding: Option<Transport>,

    /// Output format, overrides the config file
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Stop at the first payload that fails to decode
    #[arg(long)]
    fail_fast: bool,

    /// Payloads to decode. Read one per line from stdin when omitted.
    payloads: Vec<String>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config_found = cli.config.exists();
    let config = if config_found {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter.clone());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if config_found {
        info!(path = ?cli.config, "Loaded configuration");
    } else {
        info!("No configuration file found, using defaults");
    }

    let decoder = config.decoder.build()?;
    let options = BatchOptions {
        transport: cli.encoding.unwrap_or(config.input.encoding),
        format: cli.format.unwrap_or(config.output.format),
        include_header: config.output.include_header,
        fail_fast: cli.fail_fast || config.decoder.fail_fast,
    };

    let modes: Vec<u8> = decoder.modes().map(|mode| mode.code()).collect();
    info!(
        ?modes,
        encoding = %options.transport,
        format = ?options.format,
        "Starting uplink-decode"
    );

    let mut stdout = std::io::stdout().lock();
    let summary = if cli.payloads.is_empty() {
        let stdin = read_lines(std::io::stdin().lock());
        batch::run(&decoder, options, stdin, &mut stdout)?
    } else {
        batch::run(&decoder, options, cli.payloads.into_iter().map(Ok), &mut stdout)?
    };

    info!(
        decoded = summary.decoded,
        failed = summary.failed,
        skipped = summary.skipped,
        "Done"
    );

    if summary.failed > 0 {
        warn!(failed = summary.failed, "Some payloads could not be decoded");
        return Err(eyre!("{} payload(s) failed to decode", summary.failed));
    }

    Ok(())
}
