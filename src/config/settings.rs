//! Configuration settings structures for hey
//!
//! This module defines all configuration structures that can be loaded from
//! the TOML configuration file and `HEY_*` environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_username() -> Option<String> {
    Some("Hey!".to_string())
}

fn default_twilio_api_url() -> String {
    "https://api.twilio.com".to_string()
}

fn default_plivo_api_url() -> String {
    "https://api.plivo.com".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "hey.log".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

// ============================================================================
// Slack Configuration
// ============================================================================

/// Slack-compatible incoming webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Incoming webhook URL
    #[serde(default)]
    pub url: String,

    /// Message template; the built-in one is used when unset or blank
    #[serde(default)]
    pub template: Option<String>,

    /// Display name for the message
    #[serde(default = "default_username")]
    pub username: Option<String>,

    #[serde(default)]
    pub icon_url: Option<String>,

    #[serde(default)]
    pub icon_emoji: Option<String>,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            template: None,
            username: default_username(),
            icon_url: None,
            icon_emoji: None,
        }
    }
}

// ============================================================================
// Twilio Configuration
// ============================================================================

/// Twilio SMS account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwilioConfig {
    #[serde(default)]
    pub account_sid: String,

    #[serde(default)]
    pub auth_token: String,

    /// Sending phone number
    #[serde(default)]
    pub from: String,

    /// Receiving phone number
    #[serde(default)]
    pub to: String,

    #[serde(default)]
    pub template: Option<String>,

    /// REST API base URL
    #[serde(default = "default_twilio_api_url")]
    pub api_url: String,
}

impl TwilioConfig {
    /// Build the send-message endpoint for this account
    pub fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_url.trim_end_matches('/'),
            self.account_sid
        )
    }
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from: String::new(),
            to: String::new(),
            template: None,
            api_url: default_twilio_api_url(),
        }
    }
}

// ============================================================================
// Plivo Configuration
// ============================================================================

/// Plivo SMS account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlivoConfig {
    #[serde(default)]
    pub auth_id: String,

    #[serde(default)]
    pub auth_token: String,

    /// Source phone number
    #[serde(default)]
    pub from: String,

    /// Destination phone number
    #[serde(default)]
    pub to: String,

    #[serde(default)]
    pub template: Option<String>,

    /// REST API base URL
    #[serde(default = "default_plivo_api_url")]
    pub api_url: String,
}

impl PlivoConfig {
    /// Build the send-message endpoint for this account
    pub fn messages_url(&self) -> String {
        format!(
            "{}/v1/Account/{}/Message/",
            self.api_url.trim_end_matches('/'),
            self.auth_id
        )
    }
}

impl Default for PlivoConfig {
    fn default() -> Self {
        Self {
            auth_id: String::new(),
            auth_token: String::new(),
            from: String::new(),
            to: String::new(),
            template: None,
            api_url: default_plivo_api_url(),
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to LoggerConfig
    ///
    /// This method transforms the configuration file representation into
    /// the runtime LoggerConfig used by the logger module.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console_config = self.console.into_console_config();
        let file_config = self.file.into_file_config()?;

        LoggerConfig::new(console_config, file_config, self.level).map_err(|e| {
            ConfigError::ValidationError {
                field: "logger".to_string(),
                message: e.to_string(),
            }
        })
    }
}

impl ConsoleSettings {
    /// Convert ConsoleSettings to ConsoleConfig
    pub fn into_console_config(self) -> ConsoleConfig {
        ConsoleConfig::new(self.enabled, self.colored)
    }
}

impl FileSettings {
    /// Convert FileSettings to FileConfig
    ///
    /// The format is only checked when file output is enabled.
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = match self.parse_format() {
            Ok(format) => format,
            Err(e) if self.enabled => return Err(e),
            Err(_) => LogFormat::default(),
        };

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format).map_err(
            |e| ConfigError::ValidationError {
                field: "logger.file".to_string(),
                message: e.to_string(),
            },
        )
    }

    fn parse_format(&self) -> Result<LogFormat, ConfigError> {
        self.format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// Every notification section is optional; an absent section disables that
/// channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Slack-compatible webhook
    #[serde(default)]
    pub slack: Option<SlackConfig>,

    /// Twilio SMS
    #[serde(default)]
    pub twilio: Option<TwilioConfig>,

    /// Plivo SMS
    #[serde(default)]
    pub plivo: Option<PlivoConfig>,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}
