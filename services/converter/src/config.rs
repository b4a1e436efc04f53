//! Command line arguments and their resolution into a conversion run.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use conversion::ConversionOptions;
use radar_common::Producer;

/// Convert OPERA ODIM_H5 radar data into a gridded artifact.
#[derive(Parser, Debug, Clone)]
#[command(name = "odim2grid", version)]
#[command(about = "Convert OPERA ODIM_H5 radar data into gridded artifacts")]
#[command(override_usage = "odim2grid [OPTIONS] <INFILE> <OUTFILE>")]
pub struct Args {
    /// Positional input and output files
    #[arg(value_name = "FILE", num_args = 0..=2)]
    pub files: Vec<PathBuf>,

    /// Input HDF5 file (or JSON dump)
    #[arg(short = 'i', long = "infile")]
    pub infile: Option<PathBuf>,

    /// Output artifact file, `-` for standard output
    #[arg(short = 'o', long = "outfile")]
    pub outfile: Option<PathBuf>,

    /// Output area: <projdef>:<LL_lon>,<LL_lat>,<UR_lon>,<UR_lat>[:<width>,<height>]
    #[arg(short = 'P', long)]
    pub projection: Option<String>,

    /// Dataset group name prefix
    #[arg(
        long = "datasetname",
        env = "ODIM2GRID_DATASET_PREFIX",
        default_value = ConversionOptions::DEFAULT_DATASET_PREFIX
    )]
    pub dataset_prefix: String,

    /// Producer as number,name
    #[arg(short = 'p', long)]
    pub producer: Option<String>,

    /// Producer number
    #[arg(
        long = "producernumber",
        env = "ODIM2GRID_PRODUCER_NUMBER",
        default_value_t = Producer::DEFAULT_ID
    )]
    pub producer_number: u32,

    /// Producer name
    #[arg(
        long = "producername",
        env = "ODIM2GRID_PRODUCER_NAME",
        default_value = Producer::DEFAULT_NAME
    )]
    pub producer_name: String,

    /// Dump the file metadata and log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

/// A fully resolved conversion run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub options: ConversionOptions,
}

impl Args {
    /// Resolve file names and the producer, and validate the result.
    ///
    /// Positional files fill the input first and the output second,
    /// skipping whichever was given with `--infile`/`--outfile`.
    pub fn resolve(&self) -> Result<RunConfig> {
        let mut positional = self.files.iter().cloned();

        let input = match &self.infile {
            Some(path) => path.clone(),
            None => positional
                .next()
                .context("Expecting input file as parameter 1")?,
        };
        let output = match &self.outfile {
            Some(path) => path.clone(),
            None => positional
                .next()
                .context("Expecting output file as parameter 2")?,
        };
        if let Some(extra) = positional.next() {
            bail!("Unexpected extra argument '{}'", extra.display());
        }

        if !input.exists() {
            bail!("Input file '{}' does not exist", input.display());
        }

        let producer = match &self.producer {
            Some(pair) => Producer::from_pair(pair)?,
            None => Producer::new(self.producer_number, self.producer_name.clone()),
        };

        let mut options = ConversionOptions::default()
            .with_dataset_prefix(self.dataset_prefix.clone())
            .with_producer(producer)
            .with_verbose(self.verbose);
        if let Some(projection) = &self.projection {
            options = options.with_projection(projection.clone());
        }
        options.validate().map_err(anyhow::Error::msg)?;

        Ok(RunConfig {
            input,
            output,
            options,
        })
    }
}
