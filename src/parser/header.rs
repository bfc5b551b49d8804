//! Header grammar for exported chat lines.
//!
//! A message starts with `<date>, <time> - `, where the date is
//! `D/M/Y` with 1-2 digit day and month and a 2-4 digit year, and the time is
//! `H:MM` with an optional AM/PM marker (any case, with or without one
//! separating space). Everything here is a pure function over `&str`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Start-of-message detector, applied to single physical lines.
static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}, [0-9]{1,2}:[0-9]{2}(?:\s?[APap][Mm])? - ")
        .expect("header pattern is valid")
});

/// Full `<date>, <time> - <sender>: <body>` grammar, applied to whole blocks.
///
/// The sender stops at the first `": "` on the header line; the body takes
/// the rest of the block, newlines included.
static MESSAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)^([0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}), ([0-9]{1,2}:[0-9]{2})(?:\s?([APap][Mm]))? - ([^\n]*?): (.*)$",
    )
    .expect("message pattern is valid")
});

/// The pieces of a block that matched the message grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageParts<'a> {
    /// Date exactly as written, e.g. `5/1/23`.
    pub date: &'a str,
    /// Clock time without the meridiem, e.g. `9:05`.
    pub time: &'a str,
    /// `AM`/`PM` marker as written, if present.
    pub meridiem: Option<&'a str>,
    /// Untrimmed sender segment.
    pub sender: &'a str,
    /// Untrimmed body, possibly multi-line.
    pub body: &'a str,
}

impl MessageParts<'_> {
    /// Date and time in the canonical shape the timestamp templates expect:
    /// `<date>, <time>` plus ` AM`/` PM` when a marker was present.
    #[must_use]
    pub fn canonical_datetime(&self) -> String {
        match self.meridiem {
            Some(m) => format!("{}, {} {}", self.date, self.time, m.to_ascii_uppercase()),
            None => format!("{}, {}", self.date, self.time),
        }
    }
}

/// Whether a physical line opens a new message.
#[must_use]
pub fn is_header_line(line: &str) -> bool {
    HEADER.is_match(line)
}

/// Split a block into its grammar parts, or `None` if it does not match.
#[must_use]
pub fn split_message(block: &str) -> Option<MessageParts<'_>> {
    let caps = MESSAGE.captures(block)?;
    Some(MessageParts {
        date: caps.get(1)?.as_str(),
        time: caps.get(2)?.as_str(),
        meridiem: caps.get(3).map(|m| m.as_str()),
        sender: caps.get(4)?.as_str(),
        body: caps.get(5)?.as_str(),
    })
}
