//! CLI command implementations.
//!
//! Each command is implemented in its own module with a `run` function
//! that handles the command logic.

pub mod clean;
pub mod config;
pub mod export;
pub mod parse;
pub mod stats;

use std::path::Path;

use crate::config::Config;
use crate::error::{ChatError, Result};
use crate::model::Transcript;
use crate::parser::ChatParser;

/// Build a parser from configuration, applying command-line overrides.
pub fn build_parser(config: &Config, cap: Option<usize>, report_unrecognized: bool) -> Result<ChatParser> {
    if cap == Some(0) {
        return Err(ChatError::invalid_argument("cap", "must be at least 1"));
    }

    let mut parser = ChatParser::from_config(&config.parser)?;
    if let Some(cap) = cap {
        parser = parser.with_retention_cap(cap);
    }
    if report_unrecognized {
        parser = parser.with_report_unrecognized(true);
    }
    Ok(parser)
}

/// Parse `path`, failing when no message could be recovered.
pub fn load_transcript(parser: &ChatParser, path: &Path) -> Result<Transcript> {
    parser.parse_file(path)?.require_messages()
}

/// One-line parse report.
#[must_use]
pub fn parse_report(transcript: &Transcript) -> String {
    format!(
        "Parsed {} messages. Keeping the latest {}.",
        transcript.stats.records_parsed,
        transcript.len()
    )
}
