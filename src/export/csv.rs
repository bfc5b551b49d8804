//! CSV export for parsed transcripts.

use std::io::Write;

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::Transcript;

use super::Exporter;

/// Timestamp layout used in CSV cells.
const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// CSV export mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvMode {
    /// One row per message.
    #[default]
    Messages,
    /// One row per sender with message and deletion counts.
    Senders,
}

/// CSV exporter for transcripts.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    /// Export mode.
    mode: CsvMode,
    /// Include header row.
    include_header: bool,
    /// Field delimiter.
    delimiter: char,
    /// Quote character.
    quote_char: char,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvExporter {
    /// Create a new CSV exporter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: CsvMode::Messages,
            include_header: true,
            delimiter: ',',
            quote_char: '"',
        }
    }

    /// Set the export mode.
    #[must_use]
    pub fn with_mode(mut self, mode: CsvMode) -> Self {
        self.mode = mode;
        self
    }

    /// Include or exclude header row.
    #[must_use]
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delim: char) -> Self {
        self.delimiter = delim;
        self
    }

    /// Escape a field value for CSV.
    fn escape_field(&self, value: &str) -> String {
        let needs_quoting = value.contains(self.delimiter)
            || value.contains(self.quote_char)
            || value.contains('\n')
            || value.contains('\r');

        if needs_quoting {
            let escaped = value.replace(
                self.quote_char,
                &format!("{}{}", self.quote_char, self.quote_char),
            );
            format!("{}{}{}", self.quote_char, escaped, self.quote_char)
        } else {
            value.to_string()
        }
    }

    /// Write a CSV row.
    fn write_row<W: Write>(&self, writer: &mut W, fields: &[&str]) -> Result<()> {
        let line: Vec<String> = fields.iter().map(|f| self.escape_field(f)).collect();
        writeln!(writer, "{}", line.join(&self.delimiter.to_string()))?;
        Ok(())
    }

    fn export_messages<W: Write>(&self, transcript: &Transcript, writer: &mut W) -> Result<()> {
        if self.include_header {
            self.write_row(writer, &["timestamp", "sender", "body"])?;
        }
        for message in &transcript.messages {
            let ts = message.timestamp.format(CSV_TIMESTAMP_FORMAT).to_string();
            self.write_row(writer, &[&ts, &message.sender, &message.body])?;
        }
        Ok(())
    }

    fn export_senders<W: Write>(&self, transcript: &Transcript, writer: &mut W) -> Result<()> {
        let mut rows: IndexMap<&str, (usize, usize)> = IndexMap::new();
        for message in &transcript.messages {
            rows.entry(message.sender.as_str()).or_default().0 += 1;
        }
        for (sender, deleted) in &transcript.deleted_messages {
            rows.entry(sender.as_str()).or_default().1 += deleted;
        }

        if self.include_header {
            self.write_row(writer, &["sender", "messages", "deleted"])?;
        }
        for (sender, (messages, deleted)) in rows {
            self.write_row(writer, &[sender, &messages.to_string(), &deleted.to_string()])?;
        }
        Ok(())
    }
}

impl Exporter for CsvExporter {
    fn export_transcript<W: Write>(&self, transcript: &Transcript, writer: &mut W) -> Result<()> {
        match self.mode {
            CsvMode::Messages => self.export_messages(transcript, writer),
            CsvMode::Senders => self.export_senders(transcript, writer),
        }
    }
}
