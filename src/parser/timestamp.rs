//! Timestamp resolution over an ordered list of locale templates.
//!
//! The same digits can be valid under more than one template, so the order
//! below is the tie-breaker: 12-hour before 24-hour, and within each clock the
//! two-digit year before the four-digit year. Dates are always day-first.
//! Two-digit years `69`..`99` are 1969..1999 and `00`..`68` are 2000..2068.

use chrono::{Datelike, NaiveDateTime};

/// One candidate layout and the year width it accepts.
///
/// chrono's `%Y` also takes one to three digits, so the width is checked
/// against the written year before the layout is tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampTemplate {
    /// chrono format string.
    pub format: &'static str,
    /// Exact number of year digits this layout accepts.
    pub year_digits: usize,
}

/// Candidate layouts, tried in order against the canonical
/// `<date>, <time>[ AM|PM]` string built by
/// [`MessageParts::canonical_datetime`](super::MessageParts::canonical_datetime).
pub const TIMESTAMP_TEMPLATES: [TimestampTemplate; 4] = [
    TimestampTemplate { format: "%d/%m/%y, %I:%M %p", year_digits: 2 },
    TimestampTemplate { format: "%d/%m/%Y, %I:%M %p", year_digits: 4 },
    TimestampTemplate { format: "%d/%m/%y, %H:%M", year_digits: 2 },
    TimestampTemplate { format: "%d/%m/%Y, %H:%M", year_digits: 4 },
];

/// Two-digit years from here up belong to the 1900s (`69` is 1969).
pub const TWO_DIGIT_YEAR_PIVOT: i32 = 69;

/// The year as written, e.g. `23` in `5/1/23, 9:05 AM`.
fn year_field(canonical: &str) -> Option<&str> {
    let (date, _) = canonical.split_once(", ")?;
    date.rsplit('/').next()
}

/// Move a `%y` year chrono placed in 2069 to 1969.
fn apply_pivot(timestamp: NaiveDateTime) -> Option<NaiveDateTime> {
    if timestamp.year() >= 2000 + TWO_DIGIT_YEAR_PIVOT {
        timestamp.with_year(timestamp.year() - 100)
    } else {
        Some(timestamp)
    }
}

/// Resolve a canonical date/time string. The first template that parses wins.
///
/// Years must be written with exactly two or four digits; anything else
/// fails every template.
#[must_use]
pub fn resolve_timestamp(canonical: &str) -> Option<NaiveDateTime> {
    let year_digits = year_field(canonical)?.len();

    TIMESTAMP_TEMPLATES
        .iter()
        .filter(|template| template.year_digits == year_digits)
        .find_map(|template| {
            let parsed = NaiveDateTime::parse_from_str(canonical, template.format).ok()?;
            if template.year_digits == 2 {
                apply_pivot(parsed)
            } else {
                Some(parsed)
            }
        })
}
