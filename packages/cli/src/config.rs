//! TOML configuration file.
//!
//! ```toml
//! [fields]
//! latitude = "Latitude"
//! longitude = "Longitude"
//! id = "FIPS"
//! normalize_headers = true
//! dynamic_typing = false
//! delimiter = ","
//!
//! [colors.Active]
//! default_color = "9E9E9E"
//! min_value = 1
//! max_value = 1000
//! min_color = "ffe800"
//! max_color = "e00000"
//! ```
//!
//! Every section is optional. Entries under `[colors]` replace or extend
//! the stock color domains.

use std::path::Path;

use outbreak_map_encode_models::ColorTable;
use serde::Deserialize;

use crate::CliError;

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Conversion field settings.
    #[serde(default)]
    pub fields: FieldsConfig,
    /// Color domain overrides, keyed by category.
    #[serde(default = "ColorTable::empty")]
    pub colors: ColorTable,
}

/// Field and parsing settings for conversion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldsConfig {
    /// Latitude field name.
    pub latitude: Option<String>,
    /// Longitude field name.
    pub longitude: Option<String>,
    /// Field supplying feature ids.
    pub id: Option<String>,
    /// Whether to normalize header names.
    #[serde(default)]
    pub normalize_headers: bool,
    /// Whether to type numeric and boolean cells.
    #[serde(default)]
    pub dynamic_typing: bool,
    /// Single-character field delimiter.
    pub delimiter: Option<String>,
}

impl AppConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Toml`] if the document is not valid TOML or does
    /// not match the expected shape.
    pub fn parse(content: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the configuration at `path`, or the empty configuration when
    /// no path is given.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::empty());
        };
        log::debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Configuration with no field settings and no color overrides.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            fields: FieldsConfig::default(),
            colors: ColorTable::empty(),
        }
    }

    /// Stock color table with this configuration's overrides applied.
    #[must_use]
    pub fn color_table(&self) -> ColorTable {
        let mut table = ColorTable::default();
        table.merge(self.colors.clone());
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let config = AppConfig::parse(
            r#"
            [fields]
            latitude = "Lat"
            longitude = "Lon"
            id = "FIPS"
            normalize_headers = true
            dynamic_typing = true
            delimiter = ";"

            [colors.Active]
            default_color = "9E9E9E"
            min_value = 1
            max_value = 1000
            min_color = "00ff00"
            max_color = "0000ff"
            "#,
        )
        .unwrap();

        assert_eq!(config.fields.latitude.as_deref(), Some("Lat"));
        assert_eq!(config.fields.longitude.as_deref(), Some("Lon"));
        assert_eq!(config.fields.id.as_deref(), Some("FIPS"));
        assert!(config.fields.normalize_headers);
        assert!(config.fields.dynamic_typing);
        assert_eq!(config.fields.delimiter.as_deref(), Some(";"));
        assert_eq!(config.colors.len(), 1);

        let table = config.color_table();
        assert_eq!(table.len(), 4);
        assert!(table.get("Active").is_some());
        assert!(table.get("Confirmed").is_some());
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert!(config.fields.latitude.is_none());
        assert!(!config.fields.normalize_headers);
        assert!(config.colors.is_empty());
        assert_eq!(config.color_table(), ColorTable::default());
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(matches!(
            AppConfig::parse("[fields]\nnormalize_headers = \"yes\""),
            Err(CliError::Toml(_))
        ));
    }

    #[test]
    fn missing_path_loads_empty_config() {
        let config = AppConfig::load(None).unwrap();
        assert!(config.colors.is_empty());
    }
}
