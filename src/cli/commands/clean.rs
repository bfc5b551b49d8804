//! Clean command implementation.
//!
//! Writes the retained messages back out as a transcript with one
//! normalized header per message.

use crate::cli::{CleanArgs, Cli};
use crate::config::Config;
use crate::error::Result;
use crate::export::{export_to_file, export_to_string, ExportFormat, ExportOptions};

use super::{build_parser, load_transcript, parse_report};

/// Run the clean command.
pub fn run(cli: &Cli, config: &Config, args: &CleanArgs) -> Result<()> {
    let parser = build_parser(config, args.cap, false)?;
    let transcript = load_transcript(&parser, &args.file)?;
    let options = ExportOptions::default();

    match &args.output_file {
        Some(path) => {
            export_to_file(&transcript, path, ExportFormat::Text, &options)?;
            if !cli.quiet {
                eprintln!("{}", parse_report(&transcript));
                eprintln!("Wrote cleaned transcript to {}", path.display());
            }
        }
        None => {
            print!("{}", export_to_string(&transcript, ExportFormat::Text, &options)?);
        }
    }

    Ok(())
}
