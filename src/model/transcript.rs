//! Parse output: records plus side counters.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{ChatError, Result};
use crate::parser::ParseStats;

use super::MessageRecord;

/// Everything one parse invocation produces.
///
/// `messages` is sorted by timestamp and already cut down to the retention
/// cap. Media placeholders and deletion notices never appear as records;
/// they are tallied in `media_count` and `deleted_messages` instead.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    /// Parsed records, oldest first.
    pub messages: Vec<MessageRecord>,
    /// Lines that carried a media placeholder.
    pub media_count: usize,
    /// Deletion notices per sender, in order of first appearance.
    pub deleted_messages: IndexMap<String, usize>,
    /// Counters describing how the input was consumed.
    pub stats: ParseStats,
}

impl Transcript {
    /// Number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether no record survived parsing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Total deletion notices across all senders.
    #[must_use]
    pub fn total_deleted(&self) -> usize {
        self.deleted_messages.values().sum()
    }

    /// Distinct senders in order of first appearance.
    #[must_use]
    pub fn senders(&self) -> Vec<&str> {
        let mut seen: IndexMap<&str, ()> = IndexMap::new();
        for message in &self.messages {
            seen.entry(message.sender.as_str()).or_insert(());
        }
        seen.into_keys().collect()
    }

    /// Timestamp of the oldest retained record.
    #[must_use]
    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.messages.first().map(|m| m.timestamp)
    }

    /// Timestamp of the newest retained record.
    #[must_use]
    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.messages.last().map(|m| m.timestamp)
    }

    /// Turn an empty result into [`ChatError::NoMessages`].
    ///
    /// Parsing itself never fails; callers that need at least one record use
    /// this to surface the "file did not match the export format" condition.
    pub fn require_messages(self) -> Result<Self> {
        if self.messages.is_empty() {
            return Err(ChatError::NoMessages {
                lines: self.stats.lines_processed,
            });
        }
        Ok(self)
    }

    /// Render the records back into transcript text, one message per entry.
    #[must_use]
    pub fn to_transcript_text(&self) -> String {
        self.messages
            .iter()
            .map(MessageRecord::to_transcript_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
