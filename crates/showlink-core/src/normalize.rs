//! Title cleanup applied before a catalog search.

use std::sync::LazyLock;

use regex::Regex;

/// A parenthesized four-digit year, e.g. `(2017)`.
static YEAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d{4}\)").expect("year pattern is valid"));

/// Remove `(YYYY)` year tokens and trim surrounding whitespace.
///
/// `"Dark (2017)"` becomes `"Dark"`. A bare year such as `"1899"` is a title
/// in its own right and is left alone.
///
/// Removal repeats until no token is left, so a removal that exposes a new
/// token (`"(20(2017)17)"`) is handled and the result is stable under a
/// second pass.
pub fn normalize(title: &str) -> String {
    let mut current = title.to_string();
    while let Some(range) = YEAR_TOKEN.find(&current).map(|m| m.range()) {
        current.replace_range(range, "");
    }
    current.trim().to_string()
}
