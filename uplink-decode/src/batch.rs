use std::io::{self, BufRead, Write};
use std::string::FromUtf8Error;

use thiserror::Error;
use tracing::{debug, error, info};
use uplink_core::{Decoder, Transport};

use crate::output::{self, OutputFormat};

/// How each payload in a batch is read and printed.
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub transport: Transport,
    pub format: OutputFormat,
    pub include_header: bool,
    pub fail_fast: bool,
}

/// Outcome of a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub decoded: usize,
    pub failed: usize,
    /// Blank inputs that were ignored.
    pub skipped: usize,
}

/// A line of input that could not be turned into payload text.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("input line is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Lazily split `reader` into lines.
///
/// A line that is not UTF-8 is yielded as an error and reading continues. A
/// read error is yielded once and ends the stream.
pub fn read_lines<R: BufRead>(mut reader: R) -> impl Iterator<Item = Result<String, InputError>> {
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }

        let mut buf = Vec::new();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => Some(String::from_utf8(buf).map_err(InputError::from)),
            Err(e) => {
                done = true;
                Some(Err(e.into()))
            }
        }
    })
}

/// Decode every payload in `inputs`, writing one line per decoded uplink to
/// `out`. Unreadable lines and decode failures are logged and counted; only
/// write failures abort the run, unless `fail_fast` is set.
pub fn run<I, W>(
    decoder: &Decoder,
    options: BatchOptions,
    inputs: I,
    out: &mut W,
) -> color_eyre::Result<Summary>
where
    I: IntoIterator<Item = Result<String, InputError>>,
    W: Write,
{
    let mut summary = Summary::default();

    for (index, input) in inputs.into_iter().enumerate() {
        let input = match input {
            Ok(input) => input,
            Err(e) => {
                error!(index, error = %e, "Failed to read payload");
                summary.failed += 1;
                if options.fail_fast {
                    info!("Stopping at first failure");
                    break;
                }
                continue;
            }
        };

        let payload = input.trim();
        if payload.is_empty() {
            summary.skipped += 1;
            continue;
        }

        match decoder.decode_text(payload, options.transport) {
            Ok(uplink) => {
                debug!(index, payload, mode = uplink.header.mode, "Payload decoded");
                let line = output::render(&uplink, options.format, options.include_header)?;
                writeln!(out, "{line}")?;
                summary.decoded += 1;
            }
            Err(e) => {
                error!(index, payload, error = %e, "Failed to decode payload");
                summary.failed += 1;
                if options.fail_fast {
                    info!("Stopping at first failure");
                    break;
                }
            }
        }
    }

    out.flush()?;
    Ok(summary)
}
