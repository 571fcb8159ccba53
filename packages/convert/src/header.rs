//! Header normalization.
//!
//! Daily report CSVs have drifted between column spellings over time
//! (`Province/State` vs `Province_State`, `Lat` vs `Latitude`,
//! `Long_` vs `Longitude`). [`normalize_header`] folds those variants into
//! one field name so lookups stay stable across files.

use std::sync::LazyLock;

use regex::Regex;

/// Runs of characters that are not ASCII word characters.
static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("valid regex"));

/// Canonical latitude field name.
pub const LATITUDE: &str = "Latitude";

/// Canonical longitude field name.
pub const LONGITUDE: &str = "Longitude";

/// Normalizes a single header token.
///
/// The pipeline:
/// 1. Collapse each run of non-word characters into `_`
/// 2. Strip trailing `_`
/// 3. Rename anything starting with `lat` (any case) to `Latitude`
/// 4. Rename anything starting with `long` (any case) to `Longitude`
#[must_use]
pub fn normalize_header(header: &str) -> String {
    let collapsed = NON_WORD_RE.replace_all(header, "_");
    let stripped = collapsed.trim_end_matches('_');

    if starts_with_ignore_case(stripped, "lat") {
        return LATITUDE.to_string();
    }
    if starts_with_ignore_case(stripped, "long") {
        return LONGITUDE.to_string();
    }

    stripped.to_string()
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}
