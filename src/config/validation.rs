//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! so that a broken channel is reported before the command runs rather than
//! after it finishes.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{LoggerSettings, PlivoConfig, Settings, SlackConfig, TwilioConfig};

fn require(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: "Value is required and cannot be empty.".to_string(),
        });
    }
    Ok(())
}

fn require_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    require(field, value)?;

    let url = Url::parse(value).map_err(|e| ConfigError::ValidationError {
        field: field.to_string(),
        message: format!("Invalid URL '{}': {}", value, e),
    })?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: format!("URL must use http or https, got '{}'.", url.scheme()),
        });
    }

    Ok(())
}

impl SlackConfig {
    /// Validate webhook configuration
    ///
    /// # Validation Rules
    /// - URL must be a valid http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_http_url("slack.url", &self.url)
    }
}

impl TwilioConfig {
    /// Validate Twilio configuration
    ///
    /// # Validation Rules
    /// - Credentials, `from` and `to` must not be empty
    /// - `api_url` must be a valid http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("twilio.account_sid", &self.account_sid)?;
        require("twilio.auth_token", &self.auth_token)?;
        require("twilio.from", &self.from)?;
        require("twilio.to", &self.to)?;
        require_http_url("twilio.api_url", &self.api_url)
    }
}

impl PlivoConfig {
    /// Validate Plivo configuration
    ///
    /// # Validation Rules
    /// - Credentials, `from` and `to` must not be empty
    /// - `api_url` must be a valid http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("plivo.auth_id", &self.auth_id)?;
        require("plivo.auth_token", &self.auth_token)?;
        require("plivo.from", &self.from)?;
        require("plivo.to", &self.to)?;
        require_http_url("plivo.api_url", &self.api_url)
    }
}

impl LoggerSettings {
    /// Validate logger configuration
    ///
    /// Runs the same conversion the logger uses at startup, so level, output
    /// and file rules live in one place.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clone().into_logger_config().map(|_| ())
    }
}

impl Settings {
    /// Validate every configured section
    ///
    /// Absent notification sections are skipped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(plivo) = &self.plivo {
            plivo.validate()?;
        }
        if let Some(twilio) = &self.twilio {
            twilio.validate()?;
        }
        if let Some(slack) = &self.slack {
            slack.validate()?;
        }
        self.logger.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed_field(result: Result<(), ConfigError>) -> Option<String> {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => Some(field),
            _ => None,
        }
    }

    fn valid_twilio() -> TwilioConfig {
        TwilioConfig {
            account_sid: "AC123".to_string(),
            auth_token: "token".to_string(),
            from: "+15550000000".to_string(),
            to: "+15551111111".to_string(),
            ..Default::default()
        }
    }

    fn valid_plivo() -> PlivoConfig {
        PlivoConfig {
            auth_id: "MA123".to_string(),
            auth_token: "token".to_string(),
            from: "+15550000000".to_string(),
            to: "+15551111111".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_slack_requires_url() {
        let config = SlackConfig::default();
        let result = config.validate();
        assert!(result.is_err());
        if let Err(ConfigError::ValidationError { field, message }) = result {
            assert_eq!(field, "slack.url");
            assert!(message.contains("required"));
        }
    }

    #[test]
    fn test_slack_rejects_non_http_url() {
        let config = SlackConfig {
            url: "ftp://hooks.example.com/x".to_string(),
            ..Default::default()
        };
        let result = config.validate();
        assert_eq!(failed_field(result).as_deref(), Some("slack.url"));
    }

    #[test]
    fn test_slack_accepts_https_url() {
        let config = SlackConfig {
            url: "https://hooks.slack.com/services/T000/B000/XXX".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_twilio_validation() {
        assert!(valid_twilio().validate().is_ok());

        let mut config = valid_twilio();
        config.to = "  ".to_string();
        let result = config.validate();
        assert_eq!(failed_field(result).as_deref(), Some("twilio.to"));
    }

    #[test]
    fn test_plivo_validation() {
        assert!(valid_plivo().validate().is_ok());

        let mut config = valid_plivo();
        config.auth_token = String::new();
        let result = config.validate();
        assert_eq!(failed_field(result).as_deref(), Some("plivo.auth_token"));
    }

    #[test]
    fn test_settings_validate_checks_present_sections() {
        let settings = Settings {
            twilio: Some(TwilioConfig::default()),
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            twilio: Some(valid_twilio()),
            plivo: Some(valid_plivo()),
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_logger_invalid_level() {
        let settings = LoggerSettings {
            level: "loud".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_logger_requires_an_output() {
        let mut settings = LoggerSettings::default();
        settings.console.enabled = false;
        settings.file.enabled = false;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_logger_file_format_checked_only_when_enabled() {
        let mut settings = LoggerSettings::default();
        settings.file.format = "xml".to_string();
        assert!(settings.validate().is_ok());

        settings.file.enabled = true;
        assert_eq!(
            failed_field(settings.validate()).as_deref(),
            Some("logger.file.format")
        );
    }

    #[test]
    fn test_logger_enabled_file_needs_path() {
        let mut settings = LoggerSettings::default();
        settings.file.enabled = true;
        settings.file.path = String::new();
        assert!(settings.validate().is_err());
    }
}
