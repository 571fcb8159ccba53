#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Command-line front end for the outbreak map toolchain.
//!
//! `convert` turns a local CSV report into `GeoJSON`; `encode` prints the
//! color, diameter and label a single value would get. Settings come from
//! an optional TOML file (see [`config`]) with command-line flags taking
//! precedence.

pub mod config;

use std::io::{BufWriter, Read as _, Write as _};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use outbreak_map_convert::ConvertConfig;
use outbreak_map_encode::{ValueEncoder, diameter_for, format_count};
use serde::Serialize;

use crate::config::AppConfig;

/// Errors surfaced by the command-line tool.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be parsed.
    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Serializing output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input document could not be converted.
    #[error(transparent)]
    Convert(#[from] outbreak_map_convert::ConvertError),

    /// The color table is invalid.
    #[error(transparent)]
    Encode(#[from] outbreak_map_encode::EncodeError),

    /// The delimiter is not a single-byte character.
    #[error("Invalid delimiter '{0}': expected a single ASCII character or \"tab\"")]
    InvalidDelimiter(String),
}

#[derive(Debug, Parser)]
#[command(name = "outbreak_map", about = "Case-count report conversion and encoding")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a CSV report into a `GeoJSON` `FeatureCollection`
    Convert(ConvertArgs),
    /// Show the color, diameter and label for a single value
    Encode(EncodeArgs),
}

#[derive(Debug, Default, Args)]
pub struct ConvertArgs {
    /// CSV file to read (stdin when omitted)
    #[arg(long, short)]
    pub input: Option<PathBuf>,
    /// File to write `GeoJSON` to (stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    /// TOML configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,
    /// Normalize header names (`Province/State` -> `Province_State`, `Lat` -> `Latitude`)
    #[arg(long)]
    pub normalize_headers: bool,
    /// Field holding latitude
    #[arg(long)]
    pub latitude_field: Option<String>,
    /// Field holding longitude
    #[arg(long)]
    pub longitude_field: Option<String>,
    /// Field supplying feature ids
    #[arg(long)]
    pub id_field: Option<String>,
    /// Convert numeric and boolean cells into typed JSON values
    #[arg(long)]
    pub dynamic_typing: bool,
    /// Field delimiter (single character, or "tab")
    #[arg(long)]
    pub delimiter: Option<String>,
    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Category whose color domain to use
    #[arg(long, default_value = "Confirmed")]
    pub category: String,
    /// Value to encode
    #[arg(long, allow_hyphen_values = true)]
    pub value: f64,
    /// TOML configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

/// What `encode` prints for one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedValue {
    pub category: String,
    pub value: f64,
    pub color: Option<String>,
    pub diameter: u32,
    pub label: String,
}

/// Parses a delimiter flag into its byte.
///
/// # Errors
///
/// Returns [`CliError::InvalidDelimiter`] unless `value` is `tab`, `\t`,
/// or exactly one ASCII character.
pub fn parse_delimiter(value: &str) -> Result<u8, CliError> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(CliError::InvalidDelimiter(value.to_string())),
        },
    }
}

/// Combines file settings and flags into a [`ConvertConfig`].
///
/// With header normalization on, coordinates default to the canonical
/// `Latitude`/`Longitude` fields.
///
/// # Errors
///
/// Returns [`CliError::InvalidDelimiter`] for an unusable delimiter.
pub fn build_convert_config(
    args: &ConvertArgs,
    app: &AppConfig,
) -> Result<ConvertConfig, CliError> {
    let fields = &app.fields;

    let mut config = if args.normalize_headers || fields.normalize_headers {
        ConvertConfig::daily_report()
    } else {
        ConvertConfig::default()
    };

    if let Some(field) = args.latitude_field.as_ref().or(fields.latitude.as_ref()) {
        config = config.with_latitude_field(field);
    }
    if let Some(field) = args.longitude_field.as_ref().or(fields.longitude.as_ref()) {
        config = config.with_longitude_field(field);
    }
    if let Some(field) = args.id_field.as_ref().or(fields.id.as_ref()) {
        config = config.with_id_field(field);
    }
    if let Some(delimiter) = args.delimiter.as_ref().or(fields.delimiter.as_ref()) {
        config = config.with_delimiter(parse_delimiter(delimiter)?);
    }

    Ok(config.with_dynamic_typing(args.dynamic_typing || fields.dynamic_typing))
}

/// Converts `input` and serializes the collection.
///
/// # Errors
///
/// Returns [`CliError`] if conversion or serialization fails.
pub fn convert_text(input: &str, config: &ConvertConfig, pretty: bool) -> Result<String, CliError> {
    let collection = outbreak_map_convert::convert(input, config)?;
    log::info!("Converted {} features", collection.features.len());
    let json = if pretty {
        serde_json::to_string_pretty(&collection)?
    } else {
        serde_json::to_string(&collection)?
    };
    Ok(json)
}

/// Encodes one value against `encoder`.
#[must_use]
pub fn encode_value(encoder: &ValueEncoder, category: &str, value: f64) -> EncodedValue {
    #[allow(clippy::cast_possible_truncation)]
    let count = value.trunc() as i64;
    EncodedValue {
        category: category.to_string(),
        value,
        color: encoder.color_for(category, value),
        diameter: diameter_for(value),
        label: format_count(count),
    }
}

/// Runs the `convert` subcommand.
///
/// # Errors
///
/// Returns [`CliError`] if reading, converting, or writing fails.
pub fn run_convert(args: &ConvertArgs) -> Result<(), CliError> {
    let app = AppConfig::load(args.config.as_deref())?;
    let config = build_convert_config(args, &app)?;
    log::debug!("Conversion settings: {config:?}");

    let input = match &args.input {
        Some(path) => {
            log::info!("Reading {}", path.display());
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let json = convert_text(&input, &config, args.pretty)?;

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(std::fs::File::create(path)?);
            writeln!(writer, "{json}")?;
            writer.flush()?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let mut writer = BufWriter::new(std::io::stdout().lock());
            writeln!(writer, "{json}")?;
            writer.flush()?;
        }
    }

    Ok(())
}

/// Runs the `encode` subcommand.
///
/// # Errors
///
/// Returns [`CliError`] if the configuration or color table is invalid.
pub fn run_encode(args: &EncodeArgs) -> Result<(), CliError> {
    let app = AppConfig::load(args.config.as_deref())?;
    let encoder = ValueEncoder::new(app.color_table())?;

    if encoder.table().get(&args.category).is_none() {
        log::warn!("No color domain for category '{}'", args.category);
    }

    let encoded = encode_value(&encoder, &args.category, args.value);
    println!("{}", serde_json::to_string_pretty(&encoded)?);
    Ok(())
}
