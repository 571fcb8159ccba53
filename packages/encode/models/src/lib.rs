#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Color domain and category types used by the value encoder.
//!
//! A [`ColorDomain`] describes how a numeric value maps onto a two-stop
//! color gradient for one data category. A [`ColorTable`] groups the
//! domains by category name and is handed to the encoder at construction
//! time; [`ColorTable::default`] holds the three stock case-count
//! categories.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Gray used for values below a domain's minimum.
pub const DEFAULT_COLOR: &str = "9E9E9E";

/// Lower gradient stop of the stock domains (yellow).
pub const STOCK_MIN_COLOR: &str = "ffe800";

/// Upper gradient stop of the stock domains (red).
pub const STOCK_MAX_COLOR: &str = "e00000";

/// The stock case-count categories.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Category {
    /// Confirmed cases
    Confirmed,
    /// Confirmed deaths
    Deaths,
    /// Recovered cases
    Recovered,
}

impl Category {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Confirmed, Self::Deaths, Self::Recovered]
    }

    /// Human-readable title for the category.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed Cases",
            Self::Deaths => "Confirmed Deaths",
            Self::Recovered => "Recovered",
        }
    }
}

/// Gradient configuration for a single category.
///
/// Colors are six-digit hex triplets without a leading `#`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorDomain {
    /// Color returned for values below `min_value`.
    pub default_color: String,
    /// Value at which the gradient starts.
    pub min_value: f64,
    /// Value at which the gradient reaches `max_color`.
    pub max_value: f64,
    /// Color at `min_value`.
    pub min_color: String,
    /// Color at and above `max_value`.
    pub max_color: String,
}

impl ColorDomain {
    /// The yellow-to-red gradient shared by every stock category.
    #[must_use]
    pub fn stock() -> Self {
        Self {
            default_color: DEFAULT_COLOR.to_string(),
            min_value: 1.0,
            max_value: 5000.0,
            min_color: STOCK_MIN_COLOR.to_string(),
            max_color: STOCK_MAX_COLOR.to_string(),
        }
    }

    /// Whether both gradient stops are the same color, in which case no
    /// interpolation is needed.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.min_color == self.max_color
    }
}

/// Color domains keyed by category name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTable {
    domains: BTreeMap<String, ColorDomain>,
}

impl ColorTable {
    /// Creates a table with no categories.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            domains: BTreeMap::new(),
        }
    }

    /// Adds or replaces the domain for `category`.
    #[must_use]
    pub fn with_domain(mut self, category: impl Into<String>, domain: ColorDomain) -> Self {
        self.domains.insert(category.into(), domain);
        self
    }

    /// Looks up the domain for `category`.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&ColorDomain> {
        self.domains.get(category)
    }

    /// Copies every domain from `other` into this table, replacing
    /// existing entries with the same name.
    pub fn merge(&mut self, other: Self) {
        self.domains.extend(other.domains);
    }

    /// Iterates over `(category, domain)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorDomain)> {
        self.domains.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of configured categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Whether the table has no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Category::all()
            .iter()
            .fold(Self::empty(), |table, category| {
                table.with_domain(category.to_string(), ColorDomain::stock())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_stock_categories() {
        let table = ColorTable::default();
        assert_eq!(table.len(), 3);
        for category in Category::all() {
            assert_eq!(table.get(&category.to_string()), Some(&ColorDomain::stock()));
        }
    }

    #[test]
    fn category_round_trips_through_strings() {
        assert_eq!("Deaths".parse::<Category>().unwrap(), Category::Deaths);
        assert_eq!(Category::Recovered.to_string(), "Recovered");
        assert!("deaths".parse::<Category>().is_err());
    }

    #[test]
    fn merge_replaces_and_adds() {
        let mut table = ColorTable::default();
        let custom = ColorDomain {
            default_color: "000000".to_string(),
            min_value: 0.0,
            max_value: 10.0,
            min_color: "0000ff".to_string(),
            max_color: "00ff00".to_string(),
        };
        table.merge(
            ColorTable::empty()
                .with_domain("Deaths", custom.clone())
                .with_domain("Active", custom.clone()),
        );

        assert_eq!(table.len(), 4);
        assert_eq!(table.get("Deaths"), Some(&custom));
        assert_eq!(table.get("Active"), Some(&custom));
        assert_eq!(table.get("Confirmed"), Some(&ColorDomain::stock()));
    }

    #[test]
    fn deserializes_from_toml_tables() {
        let table: ColorTable = toml::from_str(
            r#"
            [Active]
            default_color = "CCCCCC"
            min_value = 10
            max_value = 100
            min_color = "00ff00"
            max_color = "00ff00"
            "#,
        )
        .unwrap();

        let domain = table.get("Active").unwrap();
        assert!((domain.min_value - 10.0).abs() < f64::EPSILON);
        assert!(domain.is_flat());
    }
}
