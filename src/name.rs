//! Backup filename anatomy.
//!
//! All backup filenames follow one template:
//!
//! ```text
//! dbname_YYYY-MM-DDThh-mm-ss-nnn-FULL.bak
//! ^----^ ^-----------------^     ^-------^
//! series timestamp               suffix
//! ```
//!
//! Anything without the `_YYYY-MM` anchor is not a backup file.

use crate::pattern::{find_pattern, CharClass, DIGITS};
use chrono::NaiveDateTime;

/// `_YYYY-MM`, the start of the date that ends the series name.
pub const YEAR_MONTH_PATTERN: [CharClass; 8] =
    ["_", DIGITS, DIGITS, DIGITS, DIGITS, "-", DIGITS, DIGITS];

/// `_YYYY-MM-DDThh-mm-ss`, the full timestamp embedded after the series name.
pub const TIMESTAMP_PATTERN: [CharClass; 20] = [
    "_", DIGITS, DIGITS, DIGITS, DIGITS, "-", DIGITS, DIGITS, "-", DIGITS, DIGITS, "T", DIGITS,
    DIGITS, "-", DIGITS, DIGITS, "-", DIGITS, DIGITS,
];

/// chrono format of the timestamp literal.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// Timestamp found inside a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp<'a> {
    /// `YYYY-MM-DDThh-mm-ss` as written in the filename. Sorts correctly as text.
    pub literal: &'a str,
    /// `None` when the literal is not a real date, e.g. month 13.
    pub parsed: Option<NaiveDateTime>,
}

/// Returns the series (database) name: everything before the `_YYYY-MM` anchor.
/// Empty when `filename` is not a backup filename.
///
/// `filename` must not contain a directory part.
pub fn extract_series_name(filename: &str) -> &str {
    match find_pattern(filename, &YEAR_MONTH_PATTERN) {
        Some(pos) => &filename[..pos],
        None => "",
    }
}

/// Finds the `_YYYY-MM-DDThh-mm-ss` timestamp in `filename`.
pub fn extract_timestamp(filename: &str) -> Option<Timestamp<'_>> {
    let pos = find_pattern(filename, &TIMESTAMP_PATTERN)?;
    // every pattern position after the underscore is a one-byte ASCII class
    let start = pos + 1;
    let literal = filename.get(start..start + TIMESTAMP_PATTERN.len() - 1)?;
    let parsed = NaiveDateTime::parse_from_str(literal, TIMESTAMP_FORMAT).ok();
    Some(Timestamp { literal, parsed })
}
