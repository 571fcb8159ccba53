#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Visual encodings for case counts.
//!
//! [`ValueEncoder`] maps a category's value onto a fill color using the
//! category's [`ColorDomain`], [`diameter_for`] sizes the marker, and
//! [`format_count`] renders the label. [`ValueEncoder::marker_for`] bundles
//! all three for one feature's properties.
//!
//! Everything here is pure: the encoder only reads the table it was built
//! with.

pub mod color;
pub mod diameter;
pub mod format;
pub mod marker;

use outbreak_map_encode_models::{ColorDomain, ColorTable};
use serde_json::{Map, Value};

pub use diameter::diameter_for;
pub use format::{format_count, with_thousands_separator};
pub use marker::MarkerStyle;

/// Errors raised while validating a color table.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// A color is not a six-digit hex triplet.
    #[error("Invalid color '{value}' for category '{category}': expected six hex digits")]
    InvalidColor {
        /// Category holding the color.
        category: String,
        /// The rejected color string.
        value: String,
    },

    /// The domain's bounds are reversed or not numbers.
    #[error(
        "Invalid domain for category '{category}': min value {min_value} must not exceed max value {max_value}"
    )]
    InvalidDomain {
        /// Category holding the domain.
        category: String,
        /// Configured lower bound.
        min_value: f64,
        /// Configured upper bound.
        max_value: f64,
    },
}

/// Maps values to colors and marker styles using a fixed [`ColorTable`].
///
/// [`ValueEncoder::default`] uses the stock case-count categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueEncoder {
    table: ColorTable,
}

impl ValueEncoder {
    /// Builds an encoder over `table`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if any domain has a malformed color or a
    /// minimum above its maximum.
    pub fn new(table: ColorTable) -> Result<Self, EncodeError> {
        for (category, domain) in table.iter() {
            validate(category, domain)?;
        }
        log::debug!("Built value encoder with {} categories", table.len());
        Ok(Self { table })
    }

    /// The table this encoder reads.
    #[must_use]
    pub const fn table(&self) -> &ColorTable {
        &self.table
    }

    /// Color for `value` in `category`, as `#rrggbb`.
    ///
    /// Returns `None` for an unknown category. Values below the domain's
    /// minimum (and `NaN`) get the default color; a flat domain returns its
    /// single color; otherwise the color is interpolated between the
    /// domain's stops, clamped at the maximum.
    #[must_use]
    pub fn color_for(&self, category: &str, value: f64) -> Option<String> {
        let domain = self.table.get(category)?;

        if value.is_nan() || value < domain.min_value {
            return Some(format!("#{}", domain.default_color));
        }
        if domain.is_flat() {
            return Some(format!("#{}", domain.min_color));
        }

        let from = color::parse_hex(&domain.min_color)?;
        let to = color::parse_hex(&domain.max_color)?;
        let t = color::progress(domain.min_value, domain.max_value, value);
        Some(color::to_hex(color::interpolate(from, to, t)))
    }

    /// Marker style for a feature, reading the count from
    /// `properties[category]`.
    ///
    /// Returns `None` when the count reads as zero or the category has no
    /// color domain.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn marker_for(&self, properties: &Map<String, Value>, category: &str) -> Option<MarkerStyle> {
        let count = properties.get(category).map_or(0, marker::leading_integer);
        if count == 0 {
            return None;
        }

        let value = count as f64;
        let Some(fill) = self.color_for(category, value) else {
            log::debug!("No color domain for category '{category}', skipping marker");
            return None;
        };

        let light = color::parse_hex(fill.trim_start_matches('#')).is_some_and(marker::is_light);
        let label_color = if light {
            marker::DARK_LABEL
        } else {
            marker::LIGHT_LABEL
        };

        Some(MarkerStyle {
            diameter: diameter_for(value),
            fill,
            stroke: marker::STROKE_COLOR.to_string(),
            stroke_width: marker::STROKE_WIDTH,
            label: format_count(count),
            label_color: label_color.to_string(),
        })
    }
}

fn validate(category: &str, domain: &ColorDomain) -> Result<(), EncodeError> {
    for color in [&domain.default_color, &domain.min_color, &domain.max_color] {
        if color::parse_hex(color).is_none() {
            return Err(EncodeError::InvalidColor {
                category: category.to_string(),
                value: color.clone(),
            });
        }
    }

    if domain.min_value.is_nan()
        || domain.max_value.is_nan()
        || domain.min_value > domain.max_value
    {
        return Err(EncodeError::InvalidDomain {
            category: category.to_string(),
            min_value: domain.min_value,
            max_value: domain.max_value,
        });
    }

    Ok(())
}
