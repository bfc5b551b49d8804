//! Chat transcript parsing.
//!
//! Turns the verbatim text of an exported chat into an ordered list of
//! [`MessageRecord`]s in five steps:
//! - pre-pass: drop media placeholder and `": null"` lines ([`prefilter`])
//! - reconstruction: group physical lines into logical blocks ([`reconstruct`])
//! - extraction: parse each block, count deletion notices ([`extract`])
//! - timestamp resolution over fixed locale templates ([`timestamp`])
//! - retention: sort by time, keep the newest N ([`retention`])
//!
//! Malformed input never produces an error. Unrecognized blocks are dropped
//! and only show up in [`ParseStats`]; set
//! [`with_report_unrecognized`](ChatParser::with_report_unrecognized) to also
//! log each one at `warn` level.
//!
//! # Example
//!
//! ```rust
//! use chat_wrapped::parser::ChatParser;
//!
//! let text = "5/1/23, 9:05 am - Alice: hello\n5/1/23, 9:06 AM - Bob: hi";
//! let transcript = ChatParser::new().parse_str(text);
//!
//! assert_eq!(transcript.len(), 2);
//! assert_eq!(transcript.messages[0].sender, "Alice");
//! ```

pub mod extract;
pub mod header;
pub mod prefilter;
pub mod reconstruct;
pub mod retention;
pub mod timestamp;

pub use extract::{extract_block, is_deletion_placeholder, is_null_body, Extraction, RejectReason};
pub use header::{is_header_line, split_message, MessageParts};
pub use prefilter::{prefilter_lines, FilteredLines, DEFAULT_MEDIA_MARKER};
pub use reconstruct::{reconstruct_blocks, LineReconstructor};
pub use retention::{apply_retention, DEFAULT_RETENTION_CAP};
pub use timestamp::{resolve_timestamp, TimestampTemplate, TIMESTAMP_TEMPLATES, TWO_DIGIT_YEAR_PIVOT};

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, instrument, trace, warn};

use crate::config::ParserConfig;
use crate::error::{ChatError, Result};
use crate::model::{MessageRecord, Transcript};

/// Preview length for rejected block diagnostics.
const PREVIEW_LEN: usize = 100;

/// Parser for exported chat transcripts.
///
/// The parser holds configuration only; every call to
/// [`parse_str`](Self::parse_str) is independent.
#[derive(Debug, Clone)]
pub struct ChatParser {
    /// Maximum number of records kept, newest first.
    retention_cap: usize,
    /// Substrings that mark a media placeholder line.
    media_markers: Vec<String>,
    /// Log and collect every rejected block.
    report_unrecognized: bool,
}

/// Statistics about one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Physical lines read.
    pub lines_processed: usize,
    /// Lines dropped by the pre-pass for carrying a media marker.
    pub media_lines: usize,
    /// Lines dropped by the pre-pass for ending in `": null"`.
    pub null_lines: usize,
    /// Logical blocks reconstructed.
    pub blocks: usize,
    /// Blocks that produced a record, before retention.
    pub records_parsed: usize,
    /// Records left after retention.
    pub records_retained: usize,
    /// Records dropped by the retention cap.
    pub dropped_by_retention: usize,
    /// Deletion notices counted.
    pub deletion_notices: usize,
    /// Blocks rejected, keyed by reason.
    pub rejections: IndexMap<RejectReason, usize>,
    /// Per-block details, collected only when reporting is enabled.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedBlock>,
}

impl ParseStats {
    /// Total rejected blocks.
    #[must_use]
    pub fn blocks_rejected(&self) -> usize {
        self.rejections.values().sum()
    }

    /// Rejected blocks for one reason.
    #[must_use]
    pub fn rejected_for(&self, reason: RejectReason) -> usize {
        self.rejections.get(&reason).copied().unwrap_or(0)
    }

    /// Share of blocks that produced a record, as a percentage.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.blocks == 0 {
            return 100.0;
        }
        (self.records_parsed as f64 / self.blocks as f64) * 100.0
    }
}

/// A block that did not become a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedBlock {
    /// First line of the block (1-indexed).
    pub line: usize,
    /// Why the block was dropped.
    pub reason: RejectReason,
    /// First line of the block, truncated.
    pub content_preview: String,
}

impl ChatParser {
    /// Create a new parser with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            retention_cap: DEFAULT_RETENTION_CAP,
            media_markers: vec![DEFAULT_MEDIA_MARKER.to_string()],
            report_unrecognized: false,
        }
    }

    /// Build a parser from configuration, validating it first.
    pub fn from_config(config: &ParserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            retention_cap: config.retention_cap,
            media_markers: config.media_markers.clone(),
            report_unrecognized: config.report_unrecognized,
        })
    }

    /// Set the retention cap.
    ///
    /// # Panics
    ///
    /// Panics if `cap` is zero.
    #[must_use]
    pub fn with_retention_cap(mut self, cap: usize) -> Self {
        assert!(cap > 0, "retention cap must be at least 1");
        self.retention_cap = cap;
        self
    }

    /// Replace the media placeholder markers.
    #[must_use]
    pub fn with_media_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.media_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Log and collect each rejected block.
    #[must_use]
    pub fn with_report_unrecognized(mut self, report: bool) -> Self {
        self.report_unrecognized = report;
        self
    }

    /// Get the retention cap.
    #[must_use]
    pub const fn retention_cap(&self) -> usize {
        self.retention_cap
    }

    /// Parse a transcript file.
    ///
    /// Fails only if the file cannot be read or is not UTF-8.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Transcript> {
        let path = path.as_ref();
        debug!("Reading transcript");

        let bytes = std::fs::read(path).map_err(|e| ChatError::from_open(path, e))?;
        let content = String::from_utf8(bytes).map_err(|source| ChatError::InvalidUtf8 {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(self.parse_str(&content))
    }

    /// Parse transcript text.
    #[instrument(skip(self, content), level = "debug", fields(bytes = content.len()))]
    pub fn parse_str(&self, content: &str) -> Transcript {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut stats = ParseStats::default();

        let filtered = prefilter_lines(content, self.media_markers.as_slice());
        stats.media_lines = filtered.media_lines;
        stats.null_lines = filtered.null_lines;
        stats.lines_processed = filtered.lines.len() + filtered.media_lines + filtered.null_lines;

        let blocks = reconstruct_blocks(filtered.lines);
        stats.blocks = blocks.len();

        let mut messages: Vec<MessageRecord> = Vec::with_capacity(blocks.len());
        let mut deleted_messages: IndexMap<String, usize> = IndexMap::new();

        for block in &blocks {
            match extract_block(block) {
                Extraction::Message(record) => messages.push(record),
                Extraction::Deleted { sender } => {
                    stats.deletion_notices += 1;
                    *deleted_messages.entry(sender).or_insert(0) += 1;
                }
                Extraction::Rejected(reason) => {
                    *stats.rejections.entry(reason).or_insert(0) += 1;
                    if self.report_unrecognized {
                        let preview = block.preview(PREVIEW_LEN);
                        warn!(line = block.first_line(), %reason, %preview, "Unrecognized block");
                        stats.rejected.push(RejectedBlock {
                            line: block.first_line(),
                            reason,
                            content_preview: preview,
                        });
                    } else {
                        trace!(line = block.first_line(), %reason, "Dropping block");
                    }
                }
            }
        }

        stats.records_parsed = messages.len();
        stats.dropped_by_retention = apply_retention(&mut messages, self.retention_cap);
        stats.records_retained = messages.len();

        debug!(
            lines = stats.lines_processed,
            blocks = stats.blocks,
            parsed = stats.records_parsed,
            retained = stats.records_retained,
            rejected = stats.blocks_rejected(),
            "Parsing complete"
        );

        Transcript {
            messages,
            media_count: filtered.media_lines,
            deleted_messages,
            stats,
        }
    }
}

impl Default for ChatParser {
    fn default() -> Self {
        Self::new()
    }
}
