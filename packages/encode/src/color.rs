//! Hex color parsing and linear RGB interpolation.

/// Parses a six-digit hex triplet (no leading `#`) into RGB channels.
#[must_use]
pub fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let mut rgb = [0u8; 3];
    hex::decode_to_slice(color, &mut rgb).ok()?;
    Some(rgb)
}

/// Formats RGB channels as a lowercase `#rrggbb` string.
#[must_use]
pub fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{}", hex::encode(rgb))
}

/// Normalized position of `value` between `start` and `end`, clamped to
/// `[0, 1]`. A degenerate range (`end <= start`) counts as fully reached.
#[must_use]
pub fn progress(start: f64, end: f64, value: f64) -> f64 {
    if end <= start {
        return 1.0;
    }
    ((value - start) / (end - start)).clamp(0.0, 1.0)
}

/// Interpolates each channel independently at position `t`, rounding to
/// the nearest integer.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn interpolate(from: [u8; 3], to: [u8; 3], t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 3];
    for (channel, (a, b)) in out.iter_mut().zip(from.into_iter().zip(to)) {
        let a = f64::from(a);
        let b = f64::from(b);
        *channel = (b - a).mul_add(t, a).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_in_either_case() {
        assert_eq!(parse_hex("ffe800"), Some([255, 232, 0]));
        assert_eq!(parse_hex("9E9E9E"), Some([158, 158, 158]));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(parse_hex("#ffe800"), None);
        assert_eq!(parse_hex("fff"), None);
        assert_eq!(parse_hex("gggggg"), None);
        assert_eq!(parse_hex(""), None);
    }

    #[test]
    fn formats_lowercase_with_marker() {
        assert_eq!(to_hex([224, 0, 0]), "#e00000");
        assert_eq!(to_hex([255, 232, 0]), "#ffe800");
    }

    #[test]
    fn clamps_progress() {
        assert!((progress(1.0, 5000.0, 1.0)).abs() < f64::EPSILON);
        assert!((progress(1.0, 5000.0, 5000.0) - 1.0).abs() < f64::EPSILON);
        assert!((progress(1.0, 5000.0, 10_000.0) - 1.0).abs() < f64::EPSILON);
        assert!((progress(1.0, 5000.0, -3.0)).abs() < f64::EPSILON);
        assert!((progress(0.0, 10.0, 2.5) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn degenerate_range_is_fully_reached() {
        assert!((progress(5.0, 5.0, 5.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn interpolates_channels_with_rounding() {
        let from = [255, 232, 0];
        let to = [224, 0, 0];
        assert_eq!(interpolate(from, to, 0.0), from);
        assert_eq!(interpolate(from, to, 1.0), to);
        // 255 - 15.5 = 239.5 -> 240, 232 - 116 = 116
        assert_eq!(interpolate(from, to, 0.5), [240, 116, 0]);
    }

    #[test]
    fn interpolates_upward_channels() {
        assert_eq!(interpolate([0, 0, 0], [255, 255, 255], 0.5), [128, 128, 128]);
    }
}
