//! The canonical parsed message.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used when a record is rendered back into transcript form.
///
/// Always day-first with a two-digit year and a 24-hour clock, so the output
/// re-parses under the first matching 24-hour template regardless of the
/// locale the source export used. Only years 1969 through 2068 survive the
/// two-digit year unchanged.
pub const TRANSCRIPT_TIMESTAMP_FORMAT: &str = "%d/%m/%y, %H:%M";

/// A single message recovered from a transcript.
///
/// Records are produced once per parse and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// When the message was sent (local wall-clock time of the export).
    pub timestamp: NaiveDateTime,
    /// Display name of the sender, trimmed.
    pub sender: String,
    /// Message text, trimmed. May contain embedded newlines.
    pub body: String,
}

impl MessageRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(timestamp: NaiveDateTime, sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            body: body.into(),
        }
    }

    /// Whether the body spans more than one line.
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        self.body.contains('\n')
    }

    /// Render the record as a transcript line.
    ///
    /// Equivalent to `to_string()`; embedded newlines in the body are kept
    /// literally, so a multi-line message renders as several physical lines.
    #[must_use]
    pub fn to_transcript_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MessageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}: {}",
            self.timestamp.format(TRANSCRIPT_TIMESTAMP_FORMAT),
            self.sender,
            self.body
        )
    }
}
