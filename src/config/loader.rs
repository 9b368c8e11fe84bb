//! Configuration loader for hey
//!
//! This module provides the `ConfigLoader` struct that finds the configuration
//! file and layers environment variable overrides on top of it.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for a specific configuration file
pub const CONFIG_FILE_ENV: &str = "HEY_CONFIG_FILE";

/// File name looked up in the home and working directories
const CONFIG_FILE_NAME: &str = ".hey.toml";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "HEY";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader
///
/// Sources, lowest priority first:
/// 1. The configuration file: `HEY_CONFIG_FILE` if set (must exist), otherwise
///    the first existing of `$HOME/.hey.toml` and `./.hey.toml`
/// 2. `HEY_*` environment variables
///
/// Having no configuration file at all is not an error; every channel is then
/// disabled unless enabled through the environment.
#[derive(Debug)]
pub struct ConfigLoader {
    /// Explicit configuration file (if set, the search paths are ignored)
    config_file: Option<PathBuf>,
    /// Candidate files, in lookup order
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader from the process environment
    pub fn new() -> Self {
        let config_file = std::env::var_os(CONFIG_FILE_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        let mut search_paths = Vec::new();
        if let Some(home) = dirs::home_dir() {
            search_paths.push(home.join(CONFIG_FILE_NAME));
        }
        search_paths.push(PathBuf::from(CONFIG_FILE_NAME));

        Self {
            config_file,
            search_paths,
        }
    }

    /// Create a loader that reads exactly `path`
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_file: Some(path.into()),
            search_paths: Vec::new(),
        }
    }

    /// Create a loader that searches `paths` in order
    pub fn with_search_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            config_file: None,
            search_paths: paths,
        }
    }

    /// Determine which configuration file will be read, if any
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if an explicit file was requested but is missing.
    pub fn resolve_path(&self) -> Result<Option<PathBuf>, ConfigError> {
        if let Some(ref config_file) = self.config_file {
            if !config_file.is_file() {
                return Err(ConfigError::file_not_found(
                    config_file.display().to_string(),
                ));
            }
            return Ok(Some(config_file.clone()));
        }

        Ok(self.search_paths.iter().find(|path| path.is_file()).cloned())
    }

    /// Load configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - an explicitly requested file is not found
    /// - the file cannot be parsed
    /// - validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.resolve_path()? {
            Some(path) => Self::add_file_source(builder, &path),
            None => builder,
        };

        // HEY_SLACK__URL -> slack.url
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn add_file_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: &Path,
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        builder.add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(true))
    }

    /// Add environment variable source to the config builder
    ///
    /// Examples:
    /// - `HEY_SLACK__URL` -> `slack.url`
    /// - `HEY_LOGGER__LEVEL` -> `logger.level`
    fn add_env_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true),
        )
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Global mutex to ensure tests run sequentially to avoid env var conflicts
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).expect("Failed to write config file");
        path
    }

    /// Helper to safely set environment variables for a test
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        fn set(&mut self, key: &str, value: &str) {
            let original = std::env::var(key).ok();
            self.vars_to_restore.push((key.to_string(), original));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            let original = std::env::var(key).ok();
            self.vars_to_restore.push((key.to_string(), original));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in &self.vars_to_restore {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_config_loader_reads_env_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set(CONFIG_FILE_ENV, "/path/to/hey.toml");

        let loader = ConfigLoader::new();
        assert_eq!(loader.config_file, Some(PathBuf::from("/path/to/hey.toml")));
    }

    #[test]
    fn test_config_loader_default_search_paths() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.remove(CONFIG_FILE_ENV);

        let loader = ConfigLoader::new();
        assert!(loader.config_file.is_none());
        assert_eq!(loader.search_paths.last(), Some(&PathBuf::from(".hey.toml")));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();

        let loader = ConfigLoader::from_file(temp_dir.path().join("missing.toml"));
        let result = loader.load();

        assert!(result.is_err());
        if let Err(ConfigError::FileNotFound(msg)) = result {
            assert!(msg.contains("missing.toml"));
        } else {
            panic!("Expected FileNotFound error");
        }
    }

    #[test]
    fn test_no_file_found_means_no_channels() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();

        let loader = ConfigLoader::with_search_paths(vec![
            temp_dir.path().join("a.toml"),
            temp_dir.path().join("b.toml"),
        ]);

        assert_eq!(loader.resolve_path().unwrap(), None);
        let settings = loader.load().expect("Should load defaults");
        assert!(settings.slack.is_none());
        assert!(settings.twilio.is_none());
        assert!(settings.plivo.is_none());
    }

    #[test]
    fn test_first_existing_search_path_wins() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let second = write_config(
            &temp_dir,
            "second.toml",
            "[slack]\nurl = \"https://hooks.example.com/second\"\n",
        );
        let third = write_config(
            &temp_dir,
            "third.toml",
            "[slack]\nurl = \"https://hooks.example.com/third\"\n",
        );

        let loader = ConfigLoader::with_search_paths(vec![
            temp_dir.path().join("first.toml"),
            second.clone(),
            third,
        ]);

        assert_eq!(loader.resolve_path().unwrap(), Some(second));
        let settings = loader.load().unwrap();
        assert_eq!(settings.slack.unwrap().url, "https://hooks.example.com/second");
    }

    #[test]
    fn test_load_all_sections() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            "hey.toml",
            r#"
[slack]
url = "https://hooks.slack.com/services/T000/B000/XXX"
icon_emoji = ":robot_face:"

[twilio]
account_sid = "AC123"
auth_token = "twilio-token"
from = "+15550000000"
to = "+15551111111"
template = "done: {{ result.command }}"

[plivo]
auth_id = "MA123"
auth_token = "plivo-token"
from = "+15550000000"
to = "+15552222222"

[logger]
level = "debug"
"#,
        );

        let settings = ConfigLoader::from_file(path).load().expect("Should load settings");

        let slack = settings.slack.unwrap();
        assert_eq!(slack.icon_emoji.as_deref(), Some(":robot_face:"));
        assert_eq!(slack.username.as_deref(), Some("Hey!"));

        let twilio = settings.twilio.unwrap();
        assert_eq!(twilio.template.as_deref(), Some("done: {{ result.command }}"));
        assert_eq!(twilio.api_url, "https://api.twilio.com");

        let plivo = settings.plivo.unwrap();
        assert_eq!(plivo.to, "+15552222222");

        assert_eq!(settings.logger.level, "debug");
    }

    #[test]
    fn test_env_var_override() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            "hey.toml",
            "[slack]\nurl = \"https://hooks.example.com/from-file\"\n",
        );

        env.set("HEY_SLACK__URL", "https://hooks.example.com/from-env");
        env.set("HEY_LOGGER__LEVEL", "warn");

        let settings = ConfigLoader::from_file(path).load().unwrap();
        assert_eq!(settings.slack.unwrap().url, "https://hooks.example.com/from-env");
        assert_eq!(settings.logger.level, "warn");
    }

    #[test]
    fn test_invalid_section_fails_validation() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "hey.toml", "[twilio]\naccount_sid = \"AC123\"\n");

        let result = ConfigLoader::from_file(path).load();
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "hey.toml", "[slack\nurl = ");

        assert!(ConfigLoader::from_file(path).load().is_err());
    }
}
