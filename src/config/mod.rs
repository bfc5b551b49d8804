//! Configuration management for chat-wrapped.
//!
//! Handles:
//! - Parser settings (retention cap, media markers, diagnostics)
//! - Analytics defaults
//! - Default export options

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};
use crate::parser::{DEFAULT_MEDIA_MARKER, DEFAULT_RETENTION_CAP};
use crate::util::atomic_write;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Transcript parser settings.
    #[serde(default)]
    pub parser: ParserConfig,
    /// Analytics settings.
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        let config_path = default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChatError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ChatError::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section for values the program cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.parser.validate()?;
        self.analytics.validate()
    }

    /// Save configuration to a specific path.
    ///
    /// The file is written to a temporary sibling first and then renamed
    /// into place.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        atomic_write(path, content.as_bytes())
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ChatError::InvalidConfig {
            message: format!("Failed to serialize config: {e}"),
        })
    }
}

/// Transcript parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Maximum number of most-recent records kept.
    #[serde(default = "default_retention_cap")]
    pub retention_cap: usize,
    /// Substrings marking a media placeholder line.
    #[serde(default = "default_media_markers")]
    pub media_markers: Vec<String>,
    /// Log every unrecognized block at warn level.
    #[serde(default)]
    pub report_unrecognized: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            retention_cap: DEFAULT_RETENTION_CAP,
            media_markers: default_media_markers(),
            report_unrecognized: false,
        }
    }
}

impl ParserConfig {
    /// Reject a zero retention cap and blank media markers.
    pub fn validate(&self) -> Result<()> {
        if self.retention_cap == 0 {
            return Err(ChatError::InvalidConfig {
                message: "parser.retention_cap must be at least 1".to_string(),
            });
        }
        if self.media_markers.iter().any(|m| m.is_empty()) {
            return Err(ChatError::InvalidConfig {
                message: "parser.media_markers must not contain empty strings".to_string(),
            });
        }
        Ok(())
    }
}

/// Analytics configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Silence (minutes) after which a message starts a new conversation.
    #[serde(default = "default_gap_minutes")]
    pub conversation_gap_minutes: u32,
    /// Number of words in the top-words table.
    #[serde(default = "default_top_words")]
    pub top_words: usize,
    /// Number of emojis in the top-emoji table.
    #[serde(default = "default_top_emojis")]
    pub top_emojis: usize,
    /// Words ignored by the top-words table in addition to the built-in list.
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            conversation_gap_minutes: default_gap_minutes(),
            top_words: default_top_words(),
            top_emojis: default_top_emojis(),
            extra_stopwords: Vec::new(),
        }
    }
}

impl AnalyticsConfig {
    /// Reject a zero conversation gap.
    pub fn validate(&self) -> Result<()> {
        if self.conversation_gap_minutes == 0 {
            return Err(ChatError::InvalidConfig {
                message: "analytics.conversation_gap_minutes must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Export configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default format for the export command.
    #[serde(default = "default_format")]
    pub format: String,
    /// Pretty-print JSON by default.
    #[serde(default)]
    pub pretty_json: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            pretty_json: false,
        }
    }
}

// Default value functions for serde
fn default_retention_cap() -> usize {
    DEFAULT_RETENTION_CAP
}

fn default_media_markers() -> Vec<String> {
    vec![DEFAULT_MEDIA_MARKER.to_string()]
}

fn default_gap_minutes() -> u32 {
    240
}

fn default_top_words() -> usize {
    100
}

fn default_top_emojis() -> usize {
    10
}

fn default_format() -> String {
    "text".to_string()
}

/// Get the default configuration path.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| ChatError::Unsupported {
        feature: "config directory discovery".to_string(),
    })?;

    Ok(config_dir.join("chat-wrapped").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.parser.retention_cap, 16_000);
        assert_eq!(config.parser.media_markers, vec!["<Media omitted>".to_string()]);
        assert!(!config.parser.report_unrecognized);
        assert_eq!(config.analytics.conversation_gap_minutes, 240);
        assert_eq!(config.export.format, "text");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[parser]
retention_cap = 500
report_unrecognized = true

[analytics]
extra_stopwords = ["bro"]
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.parser.retention_cap, 500);
        assert!(config.parser.report_unrecognized);
        assert_eq!(config.parser.media_markers, vec!["<Media omitted>".to_string()]);
        assert_eq!(config.analytics.extra_stopwords, vec!["bro".to_string()]);
        assert_eq!(config.analytics.top_words, 100);
    }

    #[test]
    fn test_zero_cap_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[parser]\nretention_cap = 0\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ChatError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.analytics.top_emojis = 3;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
