//! The `odim2grid` command line converter.
//!
//! Reads one OPERA ODIM_H5 file (or its JSON dump), converts it with
//! [`conversion::Converter`] and writes the artifact as JSON to a file or
//! to standard output.

pub mod config;
pub mod logging;

use anyhow::{Context, Result};
use conversion::{write_artifact, Converter};
use tracing::info;

pub use config::{Args, RunConfig};
pub use logging::init_tracing;

/// Convert `config.input` and write the artifact to `config.output`.
pub fn run(config: &RunConfig) -> Result<()> {
    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        producer = %config.options.producer.name,
        "Starting conversion"
    );

    let converter = Converter::new(config.options.clone());
    let artifact = converter
        .convert_file(&config.input)
        .with_context(|| format!("Failed to convert '{}'", config.input.display()))?;

    write_artifact(&artifact, &config.output)
        .with_context(|| format!("Failed to write '{}'", config.output.display()))?;

    Ok(())
}
