//! Marker styling for a single feature.
//!
//! A marker is a filled circle sized by [`crate::diameter_for`], colored by
//! the category's gradient, outlined in black, and labeled with the count.
//! Features whose count is zero get no marker at all.

use serde::Serialize;
use serde_json::Value;

/// Outline color shared by every marker.
pub const STROKE_COLOR: &str = "#000000";

/// Outline width shared by every marker.
pub const STROKE_WIDTH: u32 = 2;

/// Label color used on light fills.
pub const DARK_LABEL: &str = "#222222";

/// Label color used on dark fills.
pub const LIGHT_LABEL: &str = "#ffffff";

/// Visual encoding of one feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    /// Circle diameter in pixels.
    pub diameter: u32,
    /// Fill color as `#rrggbb`.
    pub fill: String,
    /// Outline color.
    pub stroke: String,
    /// Outline width in pixels.
    pub stroke_width: u32,
    /// Count with thousands separators.
    pub label: String,
    /// Label color picked for contrast against `fill`.
    pub label_color: String,
}

/// Reads the leading integer of a property value.
///
/// Numbers are truncated toward zero. Strings are read like a lenient
/// integer parse: leading whitespace is skipped, then an optional sign and
/// as many digits as follow (`"12.7"` gives 12, `"45 cases"` gives 45).
/// Anything without leading digits, and every other JSON type, reads as 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn leading_integer(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => parse_leading_integer(s),
        _ => 0,
    }
}

fn parse_leading_integer(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return 0;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    if negative { -magnitude } else { magnitude }
}

/// Whether a fill is light enough to need a dark label, by YIQ brightness.
#[must_use]
pub fn is_light(rgb: [u8; 3]) -> bool {
    let [r, g, b] = rgb.map(u32::from);
    (r * 299 + g * 587 + b * 114) / 1000 >= 128
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_numbers() {
        assert_eq!(leading_integer(&json!(1793)), 1793);
        assert_eq!(leading_integer(&json!(12.9)), 12);
        assert_eq!(leading_integer(&json!(-3.7)), -3);
    }

    #[test]
    fn reads_leading_digits_from_strings() {
        assert_eq!(leading_integer(&json!("67800")), 67800);
        assert_eq!(leading_integer(&json!("  42")), 42);
        assert_eq!(leading_integer(&json!("12.7")), 12);
        assert_eq!(leading_integer(&json!("45 cases")), 45);
        assert_eq!(leading_integer(&json!("-8")), -8);
        assert_eq!(leading_integer(&json!("+8")), 8);
    }

    #[test]
    fn unreadable_values_are_zero() {
        assert_eq!(leading_integer(&json!("")), 0);
        assert_eq!(leading_integer(&json!("n/a")), 0);
        assert_eq!(leading_integer(&json!("-")), 0);
        assert_eq!(leading_integer(&json!(null)), 0);
        assert_eq!(leading_integer(&json!(true)), 0);
    }

    #[test]
    fn judges_brightness() {
        assert!(is_light([255, 232, 0]));
        assert!(is_light([158, 158, 158]));
        assert!(!is_light([224, 0, 0]));
        assert!(!is_light([0, 0, 0]));
    }
}
