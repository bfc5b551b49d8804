//! Parse command implementation.
//!
//! Reports how many messages were recovered and what was dropped.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

use crate::cli::{Cli, OutputFormat, ParseArgs};
use crate::config::Config;
use crate::error::Result;
use crate::parser::ParseStats;

use super::{build_parser, load_transcript, parse_report};

/// Parse report for JSON serialization.
#[derive(Debug, Serialize)]
struct ParseOutput<'a> {
    file: PathBuf,
    parsed: usize,
    retained: usize,
    media_count: usize,
    deleted_messages: &'a IndexMap<String, usize>,
    senders: Vec<&'a str>,
    stats: &'a ParseStats,
}

/// Run the parse command.
pub fn run(cli: &Cli, config: &Config, args: &ParseArgs) -> Result<()> {
    let parser = build_parser(config, args.cap, args.report_unrecognized)?;
    let transcript = load_transcript(&parser, &args.file)?;

    match cli.effective_output() {
        OutputFormat::Json => {
            let output = ParseOutput {
                file: args.file.clone(),
                parsed: transcript.stats.records_parsed,
                retained: transcript.len(),
                media_count: transcript.media_count,
                deleted_messages: &transcript.deleted_messages,
                senders: transcript.senders(),
                stats: &transcript.stats,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{}", parse_report(&transcript));
            if cli.quiet {
                return Ok(());
            }

            let stats = &transcript.stats;
            println!();
            println!("  Lines read:       {}", stats.lines_processed);
            println!("  Blocks:           {}", stats.blocks);
            println!("  Media omitted:    {}", transcript.media_count);
            println!("  Deleted:          {}", transcript.total_deleted());
            println!("  Unrecognized:     {}", stats.blocks_rejected());
            if let (Some(first), Some(last)) = (transcript.first_timestamp(), transcript.last_timestamp()) {
                println!("  Span:             {first} to {last}");
            }

            if !transcript.deleted_messages.is_empty() {
                println!();
                println!("Deleted messages");
                println!("----------------");
                for (sender, count) in &transcript.deleted_messages {
                    println!("  {sender:20} {count}");
                }
            }

            if !stats.rejected.is_empty() {
                println!();
                println!("Unrecognized blocks");
                println!("-------------------");
                for block in &stats.rejected {
                    println!("  line {:>6}  {:24} {}", block.line, block.reason.description(), block.content_preview);
                }
            }
        }
    }

    Ok(())
}
