//! Diagnostics sink for non-fatal conversion notices.
//!
//! Rows that cannot produce a point are dropped rather than failing the
//! whole conversion. The [`ConversionDiagnostics`] trait decouples how those
//! decisions are reported from the converter itself: the stock
//! [`LogDiagnostics`] writes them to the `log` facade, [`NullDiagnostics`]
//! discards them, and tests can collect them.

use std::fmt;
use std::sync::Arc;

use crate::Record;

/// Why a row was left out of the feature collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The latitude field is absent from the row.
    MissingLatitude {
        /// Configured latitude field name.
        field: String,
    },
    /// The longitude field is absent from the row.
    MissingLongitude {
        /// Configured longitude field name.
        field: String,
    },
    /// The latitude field is present but not a finite number.
    InvalidLatitude {
        /// Configured latitude field name.
        field: String,
        /// The offending value, rendered as JSON.
        value: String,
    },
    /// The longitude field is present but not a finite number.
    InvalidLongitude {
        /// Configured longitude field name.
        field: String,
        /// The offending value, rendered as JSON.
        value: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLatitude { field } => write!(f, "missing latitude field '{field}'"),
            Self::MissingLongitude { field } => write!(f, "missing longitude field '{field}'"),
            Self::InvalidLatitude { field, value } => {
                write!(f, "bad latitude in '{field}': {value}")
            }
            Self::InvalidLongitude { field, value } => {
                write!(f, "bad longitude in '{field}': {value}")
            }
        }
    }
}

/// Receiver for the converter's filtering decisions.
///
/// Implementations must be `Send + Sync` so a single sink can be shared
/// through an [`Arc`] by concurrent conversions.
pub trait ConversionDiagnostics: Send + Sync {
    /// A data row was dropped. `line` is the 1-based line in the input
    /// where the row starts.
    fn row_skipped(&self, line: u64, reason: &SkipReason, record: &Record);

    /// Two header columns normalized to the same field name. The later
    /// column (`column`, 0-based) wins.
    fn duplicate_header(&self, name: &str, column: usize);
}

/// Reports every notice through the `log` facade.
pub struct LogDiagnostics;

impl ConversionDiagnostics for LogDiagnostics {
    fn row_skipped(&self, line: u64, reason: &SkipReason, record: &Record) {
        log::warn!("Skipping row at line {line} because {reason}");
        log::debug!("Skipped row contents: {record:?}");
    }

    fn duplicate_header(&self, name: &str, column: usize) {
        log::warn!("Header '{name}' repeats at column {column}; later column wins");
    }
}

/// Silently ignores every notice.
pub struct NullDiagnostics;

impl ConversionDiagnostics for NullDiagnostics {
    fn row_skipped(&self, _line: u64, _reason: &SkipReason, _record: &Record) {}
    fn duplicate_header(&self, _name: &str, _column: usize) {}
}

/// Returns a shared [`LogDiagnostics`] instance.
#[must_use]
pub fn log_diagnostics() -> Arc<dyn ConversionDiagnostics> {
    Arc::new(LogDiagnostics)
}

/// Returns a shared [`NullDiagnostics`] instance.
#[must_use]
pub fn null_diagnostics() -> Arc<dyn ConversionDiagnostics> {
    Arc::new(NullDiagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_reasons() {
        let reason = SkipReason::InvalidLatitude {
            field: "Latitude".to_string(),
            value: "\"n/a\"".to_string(),
        };
        assert_eq!(reason.to_string(), "bad latitude in 'Latitude': \"n/a\"");

        let reason = SkipReason::MissingLongitude {
            field: "lng".to_string(),
        };
        assert_eq!(reason.to_string(), "missing longitude field 'lng'");
    }
}
