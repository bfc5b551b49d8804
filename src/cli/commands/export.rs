//! Export command implementation.
//!
//! Exports parsed messages as text, JSON or CSV.

use crate::cli::{Cli, ExportArgs};
use crate::config::Config;
use crate::error::{ChatError, Result};
use crate::export::{export_to_file, export_to_string, ExportFormat, ExportOptions};

use super::{build_parser, load_transcript};

/// Pick the export format from the command line or configuration.
fn resolve_format(args: &ExportArgs, config: &Config) -> Result<ExportFormat> {
    let format = match args.format {
        Some(arg) => return Ok(arg.into()),
        None => ExportFormat::from_str(&config.export.format).ok_or_else(|| ChatError::InvalidConfig {
            message: format!("Unknown export.format: {}", config.export.format),
        })?,
    };

    Ok(match format {
        ExportFormat::Json if config.export.pretty_json => ExportFormat::JsonPretty,
        other => other,
    })
}

/// Collect the per-format switches.
fn export_options(args: &ExportArgs) -> ExportOptions {
    ExportOptions {
        summary: args.summary,
        envelope: !args.bare,
        csv_header: !args.no_header,
        csv_delimiter: args.delimiter,
    }
}

/// Run the export command.
pub fn run(cli: &Cli, config: &Config, args: &ExportArgs) -> Result<()> {
    let format = resolve_format(args, config)?;
    let options = export_options(args);
    let parser = build_parser(config, args.cap, false)?;
    let transcript = load_transcript(&parser, &args.file)?;

    match &args.output_file {
        Some(path) => {
            export_to_file(&transcript, path, format, &options)?;
            if !cli.quiet {
                eprintln!("Exported {} messages to {}", transcript.len(), path.display());
            }
        }
        None => print!("{}", export_to_string(&transcript, format, &options)?),
    }

    Ok(())
}
