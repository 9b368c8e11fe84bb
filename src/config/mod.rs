//! Configuration management module for hey
//!
//! This module provides configuration loading with support for:
//! - A TOML configuration file (`HEY_CONFIG_FILE`, `~/.hey.toml` or `./.hey.toml`)
//! - Environment variable overrides (`HEY_*`)
//!
//! Each notification channel has its own optional section; a missing section
//! disables that channel.

pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

// Re-export public types
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{LoggerSettings, PlivoConfig, Settings, SlackConfig, TwilioConfig};
