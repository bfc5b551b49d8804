//! Stats command implementation.
//!
//! Displays chat statistics for one transcript.

use crate::analytics::{AnalyticsOptions, ChatAnalytics};
use crate::cli::{Cli, OutputFormat, StatsArgs};
use crate::config::{AnalyticsConfig, Config};
use crate::error::{ChatError, Result};

use super::{build_parser, load_transcript, parse_report};

/// Number of rows printed for ranked tables in text output.
const TEXT_TABLE_ROWS: usize = 10;

/// Merge command-line overrides into the configured analytics settings.
fn analytics_options(config: &Config, args: &StatsArgs) -> Result<AnalyticsOptions> {
    let mut analytics: AnalyticsConfig = config.analytics.clone();
    if let Some(gap) = args.gap_minutes {
        analytics.conversation_gap_minutes = gap;
    }
    if let Some(n) = args.top_words {
        analytics.top_words = n;
    }
    if let Some(n) = args.top_emojis {
        analytics.top_emojis = n;
    }
    analytics.validate().map_err(|_| {
        ChatError::invalid_argument("gap-minutes", "must be at least 1")
    })?;
    Ok(AnalyticsOptions::from(&analytics))
}

/// Run the stats command.
pub fn run(cli: &Cli, config: &Config, args: &StatsArgs) -> Result<()> {
    let options = analytics_options(config, args)?;
    let parser = build_parser(config, args.cap, false)?;
    let transcript = load_transcript(&parser, &args.file)?;
    let analytics = ChatAnalytics::from_transcript(&transcript, &options);

    match cli.effective_output() {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&analytics)?);
        }
        OutputFormat::Text => print_text(cli, &analytics, &parse_report(&transcript)),
    }

    Ok(())
}

fn print_text(cli: &Cli, analytics: &ChatAnalytics, report: &str) {
    if !cli.quiet {
        println!("{report}");
        println!();
    }

    println!("Chat Statistics");
    println!("{}", "=".repeat(35));
    println!();

    println!("Overview");
    println!("--------");
    println!("  Messages:       {}", analytics.total_messages);
    println!("  Media omitted:  {}", analytics.media_count);
    println!("  Deleted:        {}", analytics.total_deleted());
    if let (Some(start), Some(end)) = (analytics.start_time, analytics.end_time) {
        println!("  First message:  {start}");
        println!("  Last message:   {end}");
    }
    if let Some(hour) = analytics.most_active_hour() {
        println!("  Busiest hour:   {hour:02}:00");
    }
    println!();

    println!("Messages by sender");
    println!("------------------");
    for (sender, count) in analytics.top_senders(TEXT_TABLE_ROWS) {
        let starters = analytics.conversation_starters.get(sender).copied().unwrap_or(0);
        println!("  {sender:24} {count:>7}  started {starters}");
    }
    println!();

    if let Some(gap) = &analytics.longest_gap {
        println!("Longest silence");
        println!("---------------");
        println!("  {} (broken at {})", gap.humanized(), gap.replied_at);
        println!("  before: {}", gap.before.lines().next().unwrap_or(""));
        println!("  after:  {}", gap.after.lines().next().unwrap_or(""));
        println!();
    }

    if !analytics.monthly.is_empty() {
        println!("Monthly activity");
        println!("----------------");
        for (month, count) in &analytics.monthly {
            println!("  {month:10} {count:>7}");
        }
        println!();
    }

    if !analytics.top_words.is_empty() {
        println!("Top words");
        println!("---------");
        for (word, count) in analytics.top_words.iter().take(TEXT_TABLE_ROWS) {
            println!("  {word:20} {count:>7}");
        }
        println!();
    }

    println!("Emoji");
    println!("-----");
    println!("  Total:          {}", analytics.emoji.total);
    if let Some((sender, count)) = analytics.emoji.top_sender() {
        println!("  Most by:        {sender} ({count})");
    }
    let top: Vec<String> = analytics
        .emoji
        .top
        .iter()
        .map(|(emoji, count)| format!("{emoji} {count}"))
        .collect();
    if !top.is_empty() {
        println!("  Top:            {}", top.join("  "));
    }
}
