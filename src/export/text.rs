//! Cleaned-transcript text export.
//!
//! Each record renders as `DD/MM/YY, HH:MM - sender: body` with a 24-hour
//! clock. Multi-line bodies keep their newlines, so the output has the same
//! shape as an export and parses back to the same records.

use std::io::Write;

use crate::error::Result;
use crate::model::Transcript;

use super::Exporter;

/// Plain text exporter for transcripts.
#[derive(Debug, Clone, Default)]
pub struct TextExporter {
    /// Append a summary comment block after the messages.
    with_summary: bool,
}

impl TextExporter {
    /// Create a new text exporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a summary of counters after the messages.
    ///
    /// Summary lines do not match the header grammar, so re-parsing the
    /// output folds them into the last message body. Leave this off for
    /// output meant to be parsed again.
    #[must_use]
    pub fn with_summary(mut self, enable: bool) -> Self {
        self.with_summary = enable;
        self
    }
}

impl Exporter for TextExporter {
    fn export_transcript<W: Write>(&self, transcript: &Transcript, writer: &mut W) -> Result<()> {
        for message in &transcript.messages {
            writeln!(writer, "{message}")?;
        }

        if self.with_summary {
            writeln!(writer)?;
            writeln!(writer, "# messages: {}", transcript.len())?;
            writeln!(writer, "# media omitted: {}", transcript.media_count)?;
            for (sender, count) in &transcript.deleted_messages {
                writeln!(writer, "# deleted by {sender}: {count}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ChatParser;

    fn render(exporter: &TextExporter, input: &str) -> String {
        let transcript = ChatParser::new().parse_str(input);
        let mut buffer = Vec::new();
        exporter.export_transcript(&transcript, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_twelve_hour_input_renders_as_24h() {
        let out = render(&TextExporter::new(), "31/12/2022, 11:59 pm - Alice: happy new year");
        insta::assert_snapshot!(out, @"31/12/22, 23:59 - Alice: happy new year");
    }

    #[test]
    fn test_summary_block() {
        let input = "\
5/1/23, 21:00 - Alice: hi
5/1/23, 21:01 - Bob: <Media omitted>
5/1/23, 21:02 - Bob: This message was deleted";
        let out = render(&TextExporter::new().with_summary(true), input);

        insta::assert_snapshot!(out, @r"
        05/01/23, 21:00 - Alice: hi

        # messages: 1
        # media omitted: 1
        # deleted by Bob: 1
        ");
    }
}
