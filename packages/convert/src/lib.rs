#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Converts delimited tabular text into a `GeoJSON` `FeatureCollection`.
//!
//! The first row of the input is a header. Every data row becomes a
//! [`Record`] keyed by the (optionally transformed) header names, and each
//! record that carries a finite latitude and longitude is emitted as a
//! `Point` feature whose properties are the record itself. Rows without
//! usable coordinates are dropped and reported to a
//! [`ConversionDiagnostics`] sink instead of failing the conversion.

pub mod diagnostics;
pub mod header;
pub mod numeric;

use std::fmt;
use std::sync::Arc;

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry};
use serde_json::Value;

pub use diagnostics::{
    ConversionDiagnostics, LogDiagnostics, NullDiagnostics, SkipReason, log_diagnostics,
    null_diagnostics,
};
pub use header::normalize_header;

/// One parsed data row, keyed by field name.
pub type Record = serde_json::Map<String, Value>;

/// A function applied to every header token before it becomes a field name.
pub type HeaderTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Errors that can occur during conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The CSV reader rejected the document.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Conversion settings.
///
/// Defaults: comma-delimited, headers used verbatim, coordinates read from
/// `latitude`/`longitude`, synthesized ids, string-valued properties,
/// notices sent to the `log` facade.
#[derive(Clone)]
pub struct ConvertConfig {
    header_transform: Option<HeaderTransform>,
    latitude_field: String,
    longitude_field: String,
    id_field: Option<String>,
    delimiter: u8,
    dynamic_typing: bool,
    diagnostics: Arc<dyn ConversionDiagnostics>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            header_transform: None,
            latitude_field: "latitude".to_string(),
            longitude_field: "longitude".to_string(),
            id_field: None,
            delimiter: b',',
            dynamic_typing: false,
            diagnostics: log_diagnostics(),
        }
    }
}

impl fmt::Debug for ConvertConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertConfig")
            .field("header_transform", &self.header_transform.is_some())
            .field("latitude_field", &self.latitude_field)
            .field("longitude_field", &self.longitude_field)
            .field("id_field", &self.id_field)
            .field("delimiter", &char::from(self.delimiter))
            .field("dynamic_typing", &self.dynamic_typing)
            .finish_non_exhaustive()
    }
}

impl ConvertConfig {
    /// Settings for daily case reports: headers go through
    /// [`normalize_header`] and coordinates are read from the canonical
    /// `Latitude`/`Longitude` fields.
    #[must_use]
    pub fn daily_report() -> Self {
        Self::default()
            .with_normalized_headers()
            .with_latitude_field(header::LATITUDE)
            .with_longitude_field(header::LONGITUDE)
    }

    /// Applies `transform` to every header token.
    #[must_use]
    pub fn with_header_transform(
        mut self,
        transform: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.header_transform = Some(Arc::new(transform));
        self
    }

    /// Uses [`normalize_header`] as the header transform.
    #[must_use]
    pub fn with_normalized_headers(self) -> Self {
        self.with_header_transform(normalize_header)
    }

    /// Sets the field holding latitude.
    #[must_use]
    pub fn with_latitude_field(mut self, field: &str) -> Self {
        field.clone_into(&mut self.latitude_field);
        self
    }

    /// Sets the field holding longitude.
    #[must_use]
    pub fn with_longitude_field(mut self, field: &str) -> Self {
        field.clone_into(&mut self.longitude_field);
        self
    }

    /// Takes feature ids from `field` instead of synthesizing them.
    #[must_use]
    pub fn with_id_field(mut self, field: &str) -> Self {
        self.id_field = Some(field.to_owned());
        self
    }

    /// Sets the field delimiter (e.g. `b'\t'` for TSV input).
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Converts numeric and boolean cells into typed JSON values.
    #[must_use]
    pub const fn with_dynamic_typing(mut self, enabled: bool) -> Self {
        self.dynamic_typing = enabled;
        self
    }

    /// Routes filtering notices to `diagnostics`.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn ConversionDiagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Field holding latitude.
    #[must_use]
    pub fn latitude_field(&self) -> &str {
        &self.latitude_field
    }

    /// Field holding longitude.
    #[must_use]
    pub fn longitude_field(&self) -> &str {
        &self.longitude_field
    }

    /// Field supplying feature ids, if any.
    #[must_use]
    pub fn id_field(&self) -> Option<&str> {
        self.id_field.as_deref()
    }
}

/// Converts `raw_text` into a feature collection.
///
/// Leading and trailing whitespace is trimmed first; empty input yields an
/// empty collection. Features keep input row order. Synthesized ids are
/// `id0`, `id1`, ... counted over emitted features only.
///
/// # Errors
///
/// Returns [`ConvertError::Csv`] if the CSV reader fails on the document.
pub fn convert(raw_text: &str, config: &ConvertConfig) -> Result<FeatureCollection, ConvertError> {
    let text = raw_text.trim();
    if text.is_empty() {
        log::debug!("Empty input, returning empty feature collection");
        return Ok(collection(Vec::new()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = read_headers(&mut reader, config)?;

    let mut features = Vec::new();
    let mut skipped: u64 = 0;
    let mut emitted: u64 = 0;

    for result in reader.records() {
        let row = result?;
        let line = row.position().map_or(0, csv::Position::line);
        let record = build_record(&headers, &row, config.dynamic_typing);

        match locate(&record, config) {
            Ok((longitude, latitude)) => {
                let id = feature_id(&record, config, emitted);
                emitted += 1;
                features.push(point_feature(id, longitude, latitude, record));
            }
            Err(reason) => {
                skipped += 1;
                config.diagnostics.row_skipped(line, &reason, &record);
            }
        }
    }

    log::debug!("Converted {emitted} rows into point features ({skipped} skipped)");

    Ok(collection(features))
}

/// Reads the header row, applying the configured transform to each raw
/// token and reporting names that collide after transformation.
fn read_headers(
    reader: &mut csv::Reader<&[u8]>,
    config: &ConvertConfig,
) -> Result<Vec<String>, ConvertError> {
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| {
            config
                .header_transform
                .as_ref()
                .map_or_else(|| h.to_owned(), |transform| transform(h))
        })
        .collect();

    for (column, name) in headers.iter().enumerate() {
        if headers[..column].contains(name) {
            config.diagnostics.duplicate_header(name, column);
        }
    }

    Ok(headers)
}

/// Builds a record from a row. Cells past the header width are ignored;
/// fields missing from a short row are left absent. Later duplicate
/// columns overwrite earlier ones.
fn build_record(headers: &[String], row: &csv::StringRecord, dynamic_typing: bool) -> Record {
    let mut record = Record::new();
    for (header, cell) in headers.iter().zip(row.iter()) {
        let value = if dynamic_typing {
            numeric::typed_cell(cell)
        } else {
            Value::String(cell.to_owned())
        };
        record.insert(header.clone(), value);
    }
    record
}

/// Returns `(longitude, latitude)` for a record, or why it has none.
fn locate(record: &Record, config: &ConvertConfig) -> Result<(f64, f64), SkipReason> {
    let Some(lat_value) = record.get(&config.latitude_field) else {
        return Err(SkipReason::MissingLatitude {
            field: config.latitude_field.clone(),
        });
    };
    let Some(lon_value) = record.get(&config.longitude_field) else {
        return Err(SkipReason::MissingLongitude {
            field: config.longitude_field.clone(),
        });
    };
    let Some(latitude) = numeric::coordinate(lat_value) else {
        return Err(SkipReason::InvalidLatitude {
            field: config.latitude_field.clone(),
            value: lat_value.to_string(),
        });
    };
    let Some(longitude) = numeric::coordinate(lon_value) else {
        return Err(SkipReason::InvalidLongitude {
            field: config.longitude_field.clone(),
            value: lon_value.to_string(),
        });
    };
    Ok((longitude, latitude))
}

/// Picks the feature id: the configured id field's value (empty strings
/// included), nothing when that field is absent from the row or holds a
/// non-string, non-number value, and `id{emitted}` when no id field is
/// configured.
fn feature_id(record: &Record, config: &ConvertConfig, emitted: u64) -> Option<Id> {
    let Some(field) = &config.id_field else {
        return Some(Id::String(format!("id{emitted}")));
    };
    match record.get(field) {
        Some(Value::String(s)) => Some(Id::String(s.clone())),
        Some(Value::Number(n)) => Some(Id::Number(n.clone())),
        _ => None,
    }
}

fn point_feature(id: Option<Id>, longitude: f64, latitude: f64, properties: Record) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::Point(vec![
            longitude, latitude,
        ]))),
        id,
        properties: Some(properties),
        foreign_members: None,
    }
}

const fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
