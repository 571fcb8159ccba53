#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Command-line entry point for converting case-count reports to `GeoJSON`
//! and previewing marker encodings.
//!
//! Set `RUST_LOG=warn` to see rows dropped for bad coordinates.

use clap::Parser;
use outbreak_map_cli::{Cli, Commands, run_convert, run_encode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => run_convert(&args)?,
        Commands::Encode(args) => run_encode(&args)?,
    }

    Ok(())
}
