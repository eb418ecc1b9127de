//! a85: Base85/Ascii85 command-line filter.
//!
//! Reads one input stream, encodes or decodes it, and writes the result to
//! one output stream. Diagnostics and statistics go to stderr.

mod config;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use a85_core::error::{Error, StreamError};
use a85_core::{Codec, Metrics};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("a85: {}", e);
            eprintln!("Try 'a85 --help' for more information.");
            return ExitCode::from(2);
        }
    };

    init_logging(config.verbose);

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(metrics) => {
            if config.stats {
                metrics.print_summary();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("a85: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    // A subscriber can only be set once per process; a second attempt is harmless
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init();
}

/// Build the codec, open both streams and filter one into the other.
fn run(config: &Config) -> Result<Metrics, Error> {
    let codec = Codec::from_config(&config.codec)?;
    info!(mode = ?codec.mode(), wrap = codec.wrap_width(), "codec ready");

    let reader = open_input(config.input.as_deref())?;
    let mut writer = open_output(config.output.as_deref())?;

    let metrics = codec.run(reader, &mut writer)?;
    writer.flush().map_err(Error::write)?;

    debug!(
        input_bytes = metrics.input_bytes,
        output_bytes = metrics.output_bytes,
        "run complete"
    );
    Ok(metrics)
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>, Error> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|source| StreamError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, Error> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| StreamError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
