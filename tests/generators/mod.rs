//! Synthetic chat transcript generators.
//!
//! Produces exports in the same shape as real ones: header lines in a mix
//! of 12- and 24-hour clocks, multi-line bodies, media placeholders,
//! deletion notices, `null` bodies and system notices.

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::io::Write;

/// Configuration for generating a synthetic transcript.
#[derive(Debug, Clone)]
pub struct TranscriptConfig {
    /// Number of header lines (every kind of entry counts).
    pub entries: usize,
    /// Sender names, used round-robin.
    pub senders: Vec<String>,
    /// Every Nth entry gets continuation lines (0 disables).
    pub multiline_every: usize,
    /// Every Nth entry is a media placeholder (0 disables).
    pub media_every: usize,
    /// Every Nth entry is a deletion notice (0 disables).
    pub deleted_every: usize,
    /// Every Nth entry has a `null` body (0 disables).
    pub null_every: usize,
    /// A system notice precedes every Nth entry (0 disables).
    pub notice_every: usize,
    /// Write 12-hour clock headers.
    pub twelve_hour: bool,
    /// Write four-digit years.
    pub four_digit_year: bool,
    /// Timestamp of the first entry.
    pub start_time: NaiveDateTime,
    /// Minutes between consecutive entries.
    pub step_minutes: i64,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            entries: 20,
            senders: vec!["Alice".to_string(), "Bob".to_string(), "Carol".to_string()],
            multiline_every: 4,
            media_every: 7,
            deleted_every: 11,
            null_every: 13,
            notice_every: 17,
            twelve_hour: false,
            four_digit_year: false,
            start_time: NaiveDate::from_ymd_opt(2023, 1, 1)
                .and_then(|d| d.and_hms_opt(8, 0, 0))
                .unwrap_or_default(),
            step_minutes: 3,
        }
    }
}

impl TranscriptConfig {
    /// Only plain single-line messages.
    pub fn minimal() -> Self {
        Self {
            entries: 5,
            multiline_every: 0,
            media_every: 0,
            deleted_every: 0,
            null_every: 0,
            notice_every: 0,
            ..Default::default()
        }
    }

    /// A few thousand entries with every kind of noise.
    pub fn large() -> Self {
        Self {
            entries: 5_000,
            ..Default::default()
        }
    }

    /// More entries than the default retention cap keeps.
    pub fn huge() -> Self {
        Self {
            entries: 25_000,
            step_minutes: 1,
            ..Default::default()
        }
    }
}

/// What the generator wrote, for checking parser output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedSummary {
    /// Entries that should become records.
    pub messages: usize,
    /// Media placeholder lines.
    pub media: usize,
    /// Deletion notices.
    pub deleted: usize,
    /// `null` body lines.
    pub nulls: usize,
    /// System notice lines.
    pub notices: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Media,
    Deleted,
    Null,
    Message,
}

fn hits(every: usize, index: usize) -> bool {
    every > 0 && index % every == every - 1
}

fn entry_kind(config: &TranscriptConfig, index: usize) -> EntryKind {
    if hits(config.media_every, index) {
        EntryKind::Media
    } else if hits(config.deleted_every, index) {
        EntryKind::Deleted
    } else if hits(config.null_every, index) {
        EntryKind::Null
    } else {
        EntryKind::Message
    }
}

fn header(config: &TranscriptConfig, ts: NaiveDateTime) -> String {
    let date = if config.four_digit_year {
        ts.format("%-d/%-m/%Y")
    } else {
        ts.format("%-d/%-m/%y")
    };
    let time = if config.twelve_hour {
        ts.format("%-I:%M %p")
    } else {
        ts.format("%H:%M")
    };
    format!("{date}, {time} - ")
}

/// Write a synthetic transcript and report what it contains.
pub fn generate_transcript<W: Write>(
    config: &TranscriptConfig,
    writer: &mut W,
) -> std::io::Result<GeneratedSummary> {
    let mut summary = GeneratedSummary::default();

    for index in 0..config.entries {
        let ts = config.start_time + Duration::minutes(config.step_minutes * index as i64);
        let prefix = header(config, ts);
        let sender = &config.senders[index % config.senders.len()];

        if hits(config.notice_every, index) {
            writeln!(writer, "{prefix}{sender} changed the group description")?;
            summary.notices += 1;
        }

        match entry_kind(config, index) {
            EntryKind::Media => {
                writeln!(writer, "{prefix}{sender}: <Media omitted>")?;
                summary.media += 1;
            }
            EntryKind::Deleted => {
                writeln!(writer, "{prefix}{sender}: This message was deleted")?;
                summary.deleted += 1;
            }
            EntryKind::Null => {
                writeln!(writer, "{prefix}{sender}: null")?;
                summary.nulls += 1;
            }
            EntryKind::Message => {
                writeln!(writer, "{prefix}{sender}: message {index} about pizza")?;
                if hits(config.multiline_every, index) {
                    writeln!(writer, "second line of {index}")?;
                    writeln!(writer, "  indented third line")?;
                }
                summary.messages += 1;
            }
        }
    }

    Ok(summary)
}

/// Generate a transcript into a string.
pub fn generate_transcript_string(config: &TranscriptConfig) -> (String, GeneratedSummary) {
    let mut buffer = Vec::new();
    let summary = generate_transcript(config, &mut buffer).expect("writing to a Vec cannot fail");
    let text = String::from_utf8(buffer).expect("generator writes UTF-8");
    (text, summary)
}
