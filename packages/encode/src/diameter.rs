//! Marker diameter bands.

/// Diameter, in pixels, of the marker for `value`.
///
/// | value | diameter |
/// |---|---|
/// | below 100 | 28 |
/// | 100 to 999 | 28 + round(value / 100) + 3 |
/// | 1,000 to 9,999 | 45 + round(value / 250) |
/// | 10,000 and up | 80 + round(value / 2000) |
///
/// Rounding is half away from zero. Negative and `NaN` values fall in the
/// lowest band.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn diameter_for(value: f64) -> u32 {
    let diameter = if value >= 10_000.0 {
        80.0 + (value / 2000.0).round()
    } else if value >= 1000.0 {
        45.0 + (value / 250.0).round()
    } else if value >= 100.0 {
        28.0 + (value / 100.0).round() + 3.0
    } else {
        28.0
    };
    diameter as u32
}
