//! Export of parsed transcripts.
//!
//! This module provides three formats:
//! - Text: the cleaned transcript, re-parseable by the same grammar
//! - JSON: records plus media/deletion counters and parse statistics
//! - CSV: one row per message, or one row per sender
//!
//! Format-specific switches travel in [`ExportOptions`].
//!
//! File output goes through [`AtomicFile`], so an interrupted export never
//! clobbers an existing file.

mod csv;
mod json;
mod text;

pub use csv::*;
pub use json::*;
pub use text::*;

use std::io::Write;
use std::path::Path;

use crate::error::{ChatError, Result};
use crate::model::Transcript;
use crate::util::AtomicFile;

/// Export format specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Cleaned transcript text.
    Text,
    /// Compact JSON.
    Json,
    /// Pretty-printed JSON.
    JsonPretty,
    /// CSV, one row per message.
    Csv,
    /// CSV, one row per sender with message and deletion counts.
    CsvSenders,
}

impl ExportFormat {
    /// Get the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json | Self::JsonPretty => "json",
            Self::Csv | Self::CsvSenders => "csv",
        }
    }

    /// Parse format from string.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "json-pretty" | "jsonpretty" => Some(Self::JsonPretty),
            "csv" => Some(Self::Csv),
            "csv-senders" | "senders" => Some(Self::CsvSenders),
            _ => None,
        }
    }
}

/// Options shared by the exporters.
///
/// Each switch only affects the formats it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Append a counters summary after the text transcript.
    pub summary: bool,
    /// Wrap JSON messages in an object with counters and parse statistics.
    pub envelope: bool,
    /// Write a CSV header row.
    pub csv_header: bool,
    /// CSV field delimiter.
    pub csv_delimiter: char,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            summary: false,
            envelope: true,
            csv_header: true,
            csv_delimiter: ',',
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export a transcript to the writer.
    fn export_transcript<W: Write>(&self, transcript: &Transcript, writer: &mut W) -> Result<()>;
}

fn export_with<W: Write>(
    transcript: &Transcript,
    format: ExportFormat,
    options: &ExportOptions,
    writer: &mut W,
) -> Result<()> {
    let json_exporter = || JsonExporter::new().with_envelope(options.envelope);
    let csv_exporter = |mode| {
        CsvExporter::new()
            .with_mode(mode)
            .with_header(options.csv_header)
            .with_delimiter(options.csv_delimiter)
    };

    match format {
        ExportFormat::Text => TextExporter::new()
            .with_summary(options.summary)
            .export_transcript(transcript, writer),
        ExportFormat::Json => json_exporter().export_transcript(transcript, writer),
        ExportFormat::JsonPretty => json_exporter().pretty(true).export_transcript(transcript, writer),
        ExportFormat::Csv => csv_exporter(CsvMode::Messages).export_transcript(transcript, writer),
        ExportFormat::CsvSenders => csv_exporter(CsvMode::Senders).export_transcript(transcript, writer),
    }
}

/// Export a transcript to a file.
///
/// Content is written to a temporary file first, then atomically renamed to
/// the target path.
pub fn export_to_file(
    transcript: &Transcript,
    path: impl AsRef<Path>,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<()> {
    let path = path.as_ref();

    let mut atomic = AtomicFile::create(path)?;
    let mut writer = std::io::BufWriter::new(atomic.writer());
    export_with(transcript, format, options, &mut writer)?;

    writer.flush().map_err(|e| {
        ChatError::io(format!("Failed to flush output file: {}", path.display()), e)
    })?;
    drop(writer);

    atomic.finish()
}

/// Export a transcript to a string.
pub fn export_to_string(
    transcript: &Transcript,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<String> {
    let mut buffer = Vec::new();
    export_with(transcript, format, options, &mut buffer)?;

    String::from_utf8(buffer).map_err(|e| ChatError::ExportError {
        message: "Export produced invalid UTF-8".to_string(),
        source: Some(Box::new(e)),
    })
}
