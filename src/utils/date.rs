// src/utils/date.rs

//! Deadline text parsing.

use chrono::NaiveDate;

/// Date layouts seen in listing deadlines, tried in order.
const DEADLINE_FORMATS: &[&str] = &[
    "%b %d, %Y",
    "%B %d, %Y",
    "%Y-%m-%d",
    "%d %b %Y",
    "%d %B %Y",
    "%m/%d/%Y",
];

/// Parse a free-text deadline into a calendar date.
///
/// A trailing parenthesized comment is ignored, so
/// `"Aug 31, 2024 (Jul 15, 2024)"` parses as Aug 31, 2024.
/// Returns `None` for anything unrecognized ("TBD", empty, ...).
pub fn parse_deadline(text: &str) -> Option<NaiveDate> {
    let text = match text.find('(') {
        Some(idx) => &text[..idx],
        None => text,
    };
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return None;
    }

    DEADLINE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&text, fmt).ok())
}
