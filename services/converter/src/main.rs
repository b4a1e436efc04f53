//! OPERA ODIM_H5 to gridded artifact converter.

use std::process::ExitCode;

use clap::Parser;

use odim2grid::{init_tracing, run, Args};

fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if let Err(e) = init_tracing(&args.log_level, args.verbose, args.log_json) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match args.resolve().and_then(|config| run(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
