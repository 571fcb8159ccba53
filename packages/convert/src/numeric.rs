//! Numeric validation for coordinate cells.
//!
//! A coordinate is accepted only when its cell is made of an optional sign,
//! digits, and at most one decimal point, and the parsed value is finite.
//! Exponents, hex literals, padding, `NaN` and `Infinity` are all rejected.
//! [`typed_cell`] uses a looser rule for dynamic typing.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Plain decimal rule. `outbreak_map_encode::format` applies the same
/// pattern to decide which labels get separators; keep the two in sync.
static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)$").expect("valid regex"));

/// Numbers dynamic typing converts: optional `-`, digits with an optional
/// decimal point, an optional exponent, and surrounding whitespace.
static TYPED_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t\r\n]*-?(?:[0-9]+\.?|\.[0-9]+|[0-9]+\.[0-9]+)(?:[eE][+-]?[0-9]+)?[ \t\r\n]*$")
        .expect("valid regex")
});

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+$").expect("valid regex"));

/// Largest magnitude dynamic typing turns into a number (2^53).
const MAX_TYPED_MAGNITUDE: f64 = 9_007_199_254_740_992.0;

/// Whether `s` is a plain decimal number.
#[must_use]
pub fn is_numeric(s: &str) -> bool {
    NUMERIC_RE.is_match(s)
}

/// Parses a plain decimal number, rejecting anything [`is_numeric`]
/// rejects and anything that overflows to infinity.
#[must_use]
pub fn parse_numeric(s: &str) -> Option<f64> {
    if !is_numeric(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Extracts a finite coordinate from a record value.
///
/// Strings go through [`parse_numeric`]; numbers (produced by dynamic
/// typing) are accepted as-is. Everything else is rejected.
#[must_use]
pub fn coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => parse_numeric(s),
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Converts a raw cell into a typed JSON value.
///
/// `true`/`TRUE` and `false`/`FALSE` become booleans. Decimal numbers,
/// exponents included, become JSON numbers (integers when written without
/// a fraction or exponent) as long as their magnitude is at most 2^53.
/// Empty cells become `null` and everything else stays a string.
#[must_use]
pub fn typed_cell(cell: &str) -> Value {
    match cell {
        "" => return Value::Null,
        "true" | "TRUE" => return Value::Bool(true),
        "false" | "FALSE" => return Value::Bool(false),
        _ => {}
    }
    typed_number(cell).unwrap_or_else(|| Value::String(cell.to_string()))
}

fn typed_number(cell: &str) -> Option<Value> {
    if !TYPED_NUMBER_RE.is_match(cell) {
        return None;
    }
    let trimmed = cell.trim();
    let value = trimmed.parse::<f64>().ok()?;
    if value.abs() > MAX_TYPED_MAGNITUDE {
        return None;
    }
    if INTEGER_RE.is_match(trimmed)
        && let Ok(n) = trimmed.parse::<i64>()
    {
        return Some(Value::from(n));
    }
    serde_json::Number::from_f64(value).map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_decimals() {
        assert!(is_numeric("34.05"));
        assert!(is_numeric("-118.24"));
        assert!(is_numeric("+7"));
        assert!(is_numeric("0"));
        assert!(is_numeric(".5"));
        assert!(is_numeric("12."));
    }

    #[test]
    fn rejects_non_plain_numbers() {
        assert!(!is_numeric(""));
        assert!(!is_numeric("-"));
        assert!(!is_numeric("."));
        assert!(!is_numeric("NaN"));
        assert!(!is_numeric("Infinity"));
        assert!(!is_numeric("1e5"));
        assert!(!is_numeric("0x1F"));
        assert!(!is_numeric(" 12"));
        assert!(!is_numeric("1.2.3"));
        assert!(!is_numeric("12abc"));
    }

    #[test]
    fn parses_valid_strings() {
        let v = parse_numeric("34.05").unwrap();
        assert!((v - 34.05).abs() < f64::EPSILON);
        let v = parse_numeric("-0.5").unwrap();
        assert!((v - -0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_overflowing_values() {
        let huge = "9".repeat(400);
        assert!(is_numeric(&huge));
        assert!(parse_numeric(&huge).is_none());
    }

    #[test]
    fn extracts_coordinates_from_values() {
        let from_str = coordinate(&Value::String("41.8781".to_string())).unwrap();
        assert!((from_str - 41.8781).abs() < f64::EPSILON);

        let from_num = coordinate(&serde_json::json!(-87.6298)).unwrap();
        assert!((from_num - -87.6298).abs() < f64::EPSILON);

        assert!(coordinate(&Value::Null).is_none());
        assert!(coordinate(&Value::Bool(true)).is_none());
        assert!(coordinate(&Value::String("n/a".to_string())).is_none());
    }

    #[test]
    fn types_cells() {
        assert_eq!(typed_cell("42"), serde_json::json!(42));
        assert_eq!(typed_cell("-3.5"), serde_json::json!(-3.5));
        assert_eq!(typed_cell("TRUE"), Value::Bool(true));
        assert_eq!(typed_cell("false"), Value::Bool(false));
        assert_eq!(typed_cell(""), Value::Null);
        assert_eq!(typed_cell("US"), serde_json::json!("US"));
        assert_eq!(typed_cell("2020-03-22 23:45:00"), serde_json::json!("2020-03-22 23:45:00"));
    }

    #[test]
    fn types_exponents_and_padded_numbers() {
        assert_eq!(typed_cell("1e3"), serde_json::json!(1000.0));
        assert_eq!(typed_cell("2.5E-1"), serde_json::json!(0.25));
        assert_eq!(typed_cell(" 42 "), serde_json::json!(42));
        assert_eq!(typed_cell("-.5"), serde_json::json!(-0.5));
    }

    #[test]
    fn only_exact_boolean_spellings_are_typed() {
        assert_eq!(typed_cell("TRUE"), Value::Bool(true));
        assert_eq!(typed_cell("FALSE"), Value::Bool(false));
        assert_eq!(typed_cell("True"), serde_json::json!("True"));
        assert_eq!(typed_cell("fAlse"), serde_json::json!("fAlse"));
    }

    #[test]
    fn keeps_unsafe_or_signed_numbers_as_strings() {
        assert_eq!(typed_cell("+7"), serde_json::json!("+7"));
        assert_eq!(typed_cell("9007199254740992"), serde_json::json!(9_007_199_254_740_992_i64));
        assert_eq!(
            typed_cell("99999999999999999999"),
            serde_json::json!("99999999999999999999")
        );
        assert_eq!(typed_cell("NaN"), serde_json::json!("NaN"));
    }
}
