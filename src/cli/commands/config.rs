//! Config command implementation.
//!
//! View and create the chatwrap configuration file.

use crate::cli::{load_config, Cli, ConfigAction, ConfigArgs, OutputFormat};
use crate::config::{default_config_path, Config};
use crate::error::Result;

/// Run the config command.
pub fn run(cli: &Cli, args: &ConfigArgs) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli, &load_config(cli)?),
        ConfigAction::Path => show_config_path(cli),
        ConfigAction::Init => init_config(cli),
    }
}

/// Show the effective configuration.
fn show_config(cli: &Cli, config: &Config) -> Result<()> {
    match cli.effective_output() {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Text => {
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}

/// Show configuration file path.
fn show_config_path(cli: &Cli) -> Result<()> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    println!("{}", path.display());
    Ok(())
}

/// Initialize configuration file with defaults.
fn init_config(cli: &Cli) -> Result<()> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };

    if path.exists() {
        println!("Configuration file already exists at: {}", path.display());
        return Ok(());
    }

    Config::default().save_to(&path)?;
    println!("Created configuration file at: {}", path.display());

    Ok(())
}
