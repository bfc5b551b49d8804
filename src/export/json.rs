//! JSON export for parsed transcripts.

use std::io::Write;

use serde_json::Value;

use crate::error::Result;
use crate::model::Transcript;

use super::Exporter;

/// JSON exporter.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    /// Pretty-print the JSON output.
    pretty: bool,
    /// Wrap messages with counters and parse statistics.
    use_envelope: bool,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonExporter {
    /// Create a new JSON exporter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pretty: false,
            use_envelope: true,
        }
    }

    /// Enable pretty-printing.
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Use envelope wrapper. Without it only the message array is written.
    #[must_use]
    pub fn with_envelope(mut self, use_envelope: bool) -> Self {
        self.use_envelope = use_envelope;
        self
    }

    /// Write JSON value to writer.
    fn write_json<W: Write>(&self, writer: &mut W, value: &Value) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, value)?;
        } else {
            serde_json::to_writer(&mut *writer, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Exporter for JsonExporter {
    fn export_transcript<W: Write>(&self, transcript: &Transcript, writer: &mut W) -> Result<()> {
        let value = if self.use_envelope {
            serde_json::to_value(transcript)?
        } else {
            serde_json::to_value(&transcript.messages)?
        };
        self.write_json(writer, &value)
    }
}
