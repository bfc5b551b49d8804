//! Command-line interface for chat-wrapped.
//!
//! Provides scriptable access to chat exports with these commands:
//! - `parse`: Parse a transcript and report what was kept
//! - `clean`: Write the cleaned transcript
//! - `export`: Export messages as text, JSON or CSV
//! - `stats`: Show chat statistics
//! - `config`: Inspect and create the configuration file

mod commands;

pub use commands::*;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use crate::config::Config;
use crate::error::Result;
use crate::export::ExportFormat;

/// Turn exported chat transcripts into clean, ordered messages.
#[derive(Debug, Parser)]
#[command(name = "chatwrap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format for reports.
    #[arg(short = 'o', long, global = true, default_value = "text", env = "CHATWRAP_OUTPUT")]
    pub output: OutputFormat,

    /// Suppress non-essential output.
    #[arg(short = 'q', long, global = true, env = "CHATWRAP_QUIET")]
    pub quiet: bool,

    /// Output as JSON (shorthand for -o json).
    #[arg(long, global = true, env = "CHATWRAP_JSON")]
    pub json: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn", env = "CHATWRAP_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Log format (text, json, compact, pretty).
    #[arg(long, global = true, default_value = "text", env = "CHATWRAP_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Path to custom configuration file.
    #[arg(long, global = true, env = "CHATWRAP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Log level options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    #[default]
    Warn,
    /// Errors, warnings, and informational messages.
    Info,
    /// All of the above plus debug messages.
    Debug,
    /// All messages including trace-level details.
    Trace,
}

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// Structured JSON format for machine consumption.
    Json,
    /// Compact single-line format.
    Compact,
    /// Pretty format with full details.
    Pretty,
}

impl LogLevel {
    /// The matching `tracing` level filter.
    #[must_use]
    pub const fn as_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output.
    Json,
}

impl Cli {
    /// Get effective output format.
    #[must_use]
    pub fn effective_output(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.output
        }
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a transcript and report how many messages were kept.
    #[command(alias = "p")]
    Parse(ParseArgs),

    /// Write the cleaned transcript, one normalized header per message.
    Clean(CleanArgs),

    /// Export messages to various formats.
    #[command(alias = "x")]
    Export(ExportArgs),

    /// Show chat statistics.
    #[command(alias = "stat")]
    Stats(StatsArgs),

    /// View and create configuration.
    #[command(alias = "cfg")]
    Config(ConfigArgs),

    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the parse command.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// Chat export to parse.
    pub file: PathBuf,

    /// Keep at most this many of the most recent messages.
    #[arg(long)]
    pub cap: Option<usize>,

    /// Log every unrecognized block and list them in the report.
    #[arg(long)]
    pub report_unrecognized: bool,
}

/// Arguments for the clean command.
#[derive(Debug, Parser)]
pub struct CleanArgs {
    /// Chat export to clean.
    pub file: PathBuf,

    /// Keep at most this many of the most recent messages.
    #[arg(long)]
    pub cap: Option<usize>,

    /// Output file path (stdout if not specified).
    #[arg(short = 'O', long = "out")]
    pub output_file: Option<PathBuf>,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Chat export to read.
    pub file: PathBuf,

    /// Export format (defaults to the configured format).
    #[arg(short = 'f', long, env = "CHATWRAP_EXPORT_FORMAT")]
    pub format: Option<ExportFormatArg>,

    /// Output file path (stdout if not specified).
    #[arg(short = 'O', long = "out")]
    pub output_file: Option<PathBuf>,

    /// Keep at most this many of the most recent messages.
    #[arg(long)]
    pub cap: Option<usize>,

    /// Append message, media and deletion counts to text output.
    #[arg(long)]
    pub summary: bool,

    /// Write JSON as a bare message array without counters.
    #[arg(long)]
    pub bare: bool,

    /// Omit the CSV header row.
    #[arg(long)]
    pub no_header: bool,

    /// CSV field delimiter.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,
}

/// Export format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormatArg {
    /// Cleaned transcript text.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// Pretty JSON.
    JsonPretty,
    /// CSV tabular format.
    Csv,
    /// CSV with one row per sender.
    CsvSenders,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Text => ExportFormat::Text,
            ExportFormatArg::Json => ExportFormat::Json,
            ExportFormatArg::JsonPretty => ExportFormat::JsonPretty,
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::CsvSenders => ExportFormat::CsvSenders,
        }
    }
}

/// Arguments for the stats command.
#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Chat export to analyse.
    pub file: PathBuf,

    /// Minutes of silence after which a message starts a new conversation.
    #[arg(long)]
    pub gap_minutes: Option<u32>,

    /// Number of words in the top-words table.
    #[arg(long)]
    pub top_words: Option<usize>,

    /// Number of emojis in the top-emoji table.
    #[arg(long)]
    pub top_emojis: Option<usize>,

    /// Keep at most this many of the most recent messages.
    #[arg(long)]
    pub cap: Option<usize>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Config action to perform.
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommand actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show configuration file path.
    Path,

    /// Initialize configuration file with defaults.
    Init,
}

/// Arguments for the completions command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Print completions for `shell` to stdout.
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// `RUST_LOG` when set, otherwise everything at `level` and above.
fn log_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(level.as_filter().into())
            .parse_lossy("")
    })
}

/// Install the stderr subscriber chosen by `--log-format`.
fn init_logging(cli: &Cli) {
    use tracing_subscriber::{
        fmt::{self, format::FmtSpan},
        layer::SubscriberExt,
        util::SubscriberInitExt,
        Layer, Registry,
    };

    let stderr = fmt::layer().with_writer(io::stderr);
    let layer: Box<dyn Layer<Registry> + Send + Sync> = match cli.log_format {
        LogFormat::Text => stderr.boxed(),
        LogFormat::Compact => stderr.compact().with_target(false).boxed(),
        LogFormat::Pretty => stderr.pretty().with_file(true).with_line_number(true).boxed(),
        LogFormat::Json => stderr.json().with_span_events(FmtSpan::CLOSE).boxed(),
    };

    let installed = tracing_subscriber::registry()
        .with(layer)
        .with(log_filter(cli.log_level))
        .try_init();
    if let Err(e) = installed {
        eprintln!("Warning: logging disabled: {e}");
    }
}

/// Load the configuration named on the command line, or the default one.
///
/// An explicit `--config` path must load cleanly; a broken file at the
/// default location only produces a warning.
pub(crate) fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Ok(Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unreadable default configuration");
            Config::default()
        })),
    }
}

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli);

    match &cli.command {
        Commands::Parse(args) => commands::parse::run(&cli, &load_config(&cli)?, args),
        Commands::Clean(args) => commands::clean::run(&cli, &load_config(&cli)?, args),
        Commands::Export(args) => commands::export::run(&cli, &load_config(&cli)?, args),
        Commands::Stats(args) => commands::stats::run(&cli, &load_config(&cli)?, args),
        Commands::Config(args) => commands::config::run(&cli, args),
        Commands::Completions(args) => {
            generate_completions(args.shell);
            Ok(())
        }
    }
}
