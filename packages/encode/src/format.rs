//! Thousands-separator formatting for marker labels.

use std::sync::LazyLock;

use regex::Regex;

/// Plain decimal rule shared with `outbreak_map_convert::numeric`, so a
/// cell that converts as a coordinate also formats as a number.
static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)$").expect("valid regex"));

/// Inserts `,` every three digits from the right of the integer part.
///
/// The sign and any fractional digits are kept as-is. Input that is not a
/// plain decimal number is returned unchanged.
#[must_use]
pub fn with_thousands_separator(input: &str) -> String {
    if !NUMERIC_RE.is_match(input) {
        return input.to_string();
    }

    let (sign, unsigned) = match input.strip_prefix(['+', '-']) {
        Some(rest) => input.split_at(input.len() - rest.len()),
        None => ("", input),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(input.len() + integer.len() / 3);
    out.push_str(sign);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Formats an integer count with thousands separators.
#[must_use]
pub fn format_count(value: i64) -> String {
    with_thousands_separator(&value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_integer_digits() {
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(-67_800), "-67,800");
    }

    #[test]
    fn groups_numeric_strings() {
        assert_eq!(with_thousands_separator("1234567"), "1,234,567");
        assert_eq!(with_thousands_separator("+100000"), "+100,000");
    }

    #[test]
    fn leaves_fraction_ungrouped() {
        assert_eq!(with_thousands_separator("1234.5678"), "1,234.5678");
        assert_eq!(with_thousands_separator(".5"), ".5");
    }

    #[test]
    fn returns_non_numeric_input_unchanged() {
        assert_eq!(with_thousands_separator("abc"), "abc");
        assert_eq!(with_thousands_separator(""), "");
        assert_eq!(with_thousands_separator("12 345"), "12 345");
        assert_eq!(with_thousands_separator("1e6"), "1e6");
    }

    #[test]
    fn follows_coordinate_number_rule() {
        assert_eq!(with_thousands_separator("-1234."), "-1,234.");
        assert_eq!(with_thousands_separator("+7"), "+7");
        for rejected in ["-", ".", "NaN", "Infinity", "0x1F", " 12", "1.2.3", "12abc"] {
            assert_eq!(with_thousands_separator(rejected), rejected);
        }
    }
}
