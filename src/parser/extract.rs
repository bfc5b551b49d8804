//! Message extraction: one logical block in, one record (or a verdict) out.

use std::fmt;

use serde::Serialize;

use crate::model::{LogicalBlock, MessageRecord};

use super::header::split_message;
use super::timestamp::resolve_timestamp;

/// Bodies the exporter writes in place of a deleted message.
pub const DELETION_PLACEHOLDERS: [&str; 2] = ["you deleted this message", "this message was deleted"];

/// Why a block did not become a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The block does not match `<date>, <time> - <sender>: <body>`.
    NoMatch,
    /// The sender segment is blank.
    EmptySender,
    /// The body is the exporter's `null` placeholder.
    NullBody,
    /// No timestamp template accepted the date and time.
    UnresolvedTimestamp,
}

impl RejectReason {
    /// Short human-readable label.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NoMatch => "no message header",
            Self::EmptySender => "empty sender",
            Self::NullBody => "null body",
            Self::UnresolvedTimestamp => "unrecognized date/time",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Outcome of extracting one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A valid message.
    Message(MessageRecord),
    /// A deletion notice from `sender`; counted, never kept as a record.
    Deleted {
        /// Trimmed sender name.
        sender: String,
    },
    /// Dropped silently.
    Rejected(RejectReason),
}

/// Whether a trimmed body is a deletion placeholder (any case).
#[must_use]
pub fn is_deletion_placeholder(body: &str) -> bool {
    let body = body.trim();
    DELETION_PLACEHOLDERS
        .iter()
        .any(|placeholder| body.eq_ignore_ascii_case(placeholder))
}

/// Whether a trimmed body is the `null` placeholder (any case).
#[must_use]
pub fn is_null_body(body: &str) -> bool {
    body.trim().eq_ignore_ascii_case("null")
}

/// Extract a record from a block.
///
/// Checks run in a fixed order: grammar, sender, null body, deletion notice,
/// then timestamp resolution. Deletion notices are reported even when their
/// timestamp would not resolve, so the per-sender tally sees every notice.
#[must_use]
pub fn extract_block(block: &LogicalBlock) -> Extraction {
    let Some(parts) = split_message(block.text()) else {
        return Extraction::Rejected(RejectReason::NoMatch);
    };

    let sender = parts.sender.trim();
    if sender.is_empty() {
        return Extraction::Rejected(RejectReason::EmptySender);
    }
    if is_null_body(parts.body) {
        return Extraction::Rejected(RejectReason::NullBody);
    }
    if is_deletion_placeholder(parts.body) {
        return Extraction::Deleted {
            sender: sender.to_string(),
        };
    }

    match resolve_timestamp(&parts.canonical_datetime()) {
        Some(timestamp) => Extraction::Message(MessageRecord::new(timestamp, sender, parts.body.trim())),
        None => Extraction::Rejected(RejectReason::UnresolvedTimestamp),
    }
}
