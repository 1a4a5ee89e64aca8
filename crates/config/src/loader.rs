//! Settings loader implementation

use crate::schema::Settings;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use std::path::Path;
use types::{ActorError, ConfigError};

/// Well-known variables read without the `ACTOR_` prefix
const RAW_ENV_KEYS: &[(&str, &str)] = &[
    ("GITHUB_TOKEN", "github.token"),
    ("ENCRYPTION_KEY_ID", "github.encryption_key_id"),
    ("REPO_OWNER", "github.owner"),
    ("REPO_NAME", "github.repo"),
    ("GITHUB_API_URL", "github.api_url"),
    ("API_KEY", "env.api_key"),
];

/// Settings loader that handles YAML files and environment variables
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings, using the file only when it exists
    pub fn load_or_default<P: AsRef<Path>>(config_path: P) -> Result<Settings> {
        let config_path = config_path.as_ref();
        if config_path.exists() {
            Self::load_layers(Some(config_path))
        } else {
            tracing::debug!(path = %config_path.display(), "No settings file, using defaults");
            Self::load_layers(None)
        }
    }

    fn load_layers(config_path: Option<&Path>) -> Result<Settings> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));

        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }

        // Override with environment variables (prefixed with ACTOR_, `__` nests)
        figment = figment.merge(Env::prefixed("ACTOR_").split("__"));

        // Unprefixed variables stay strings, key ids are numeric and may lead with zeros
        for &(var, key) in RAW_ENV_KEYS {
            if let Ok(value) = std::env::var(var) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }

        let mut settings: Settings = figment
            .extract()
            .context("Failed to parse configuration")?;

        if std::env::var("DEBUG").as_deref() == Ok("true") {
            settings.logging.debug = true;
        }

        Self::validate(&settings)?;

        Ok(settings)
    }

    /// Load settings from string (for testing)
    pub fn load_from_str(yaml_content: &str) -> Result<Settings> {
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Yaml::string(yaml_content))
            .extract()
            .context("Failed to parse configuration from string")?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Validate settings
    fn validate(settings: &Settings) -> Result<()> {
        if settings.github.owner.trim().is_empty() {
            return Err(ActorError::from(ConfigError::MissingField {
                field: "github.owner".to_string(),
            })
            .into());
        }

        if settings.github.repo.trim().is_empty() {
            return Err(ActorError::from(ConfigError::MissingField {
                field: "github.repo".to_string(),
            })
            .into());
        }

        let api_url = &settings.github.api_url;
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ActorError::from(ConfigError::ValidationError {
                field: "github.api_url".to_string(),
                message: format!("Invalid API URL format: {}", api_url),
            })
            .into());
        }

        if settings.env.file_prefix.is_empty() {
            return Err(ActorError::from(ConfigError::ValidationError {
                field: "env.file_prefix".to_string(),
                message: "Environment file prefix cannot be empty".to_string(),
            })
            .into());
        }

        if settings.workflows.runner.trim().is_empty() {
            return Err(ActorError::from(ConfigError::MissingField {
                field: "workflows.runner".to_string(),
            })
            .into());
        }

        if settings.publisher.request_timeout_seconds == Some(0) {
            return Err(ActorError::from(ConfigError::ValidationError {
                field: "publisher.request_timeout_seconds".to_string(),
                message: "Request timeout must be greater than 0".to_string(),
            })
            .into());
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&settings.logging.level.as_str()) {
            return Err(ActorError::from(ConfigError::ValidationError {
                field: "logging.level".to_string(),
                message: format!(
                    "Invalid log level: {}. Valid levels: {:?}",
                    settings.logging.level, valid_log_levels
                ),
            })
            .into());
        }

        let valid_log_formats = ["compact", "pretty", "json"];
        if !valid_log_formats.contains(&settings.logging.format.as_str()) {
            return Err(ActorError::from(ConfigError::ValidationError {
                field: "logging.format".to_string(),
                message: format!(
                    "Invalid log format: {}. Valid formats: {:?}",
                    settings.logging.format, valid_log_formats
                ),
            })
            .into());
        }

        Ok(())
    }

    /// Get default settings
    pub fn default() -> Settings {
        Settings::default()
    }

    /// Create example settings file
    pub fn create_example<P: AsRef<Path>>(path: P) -> Result<()> {
        let settings = Self::default();
        let yaml_content = serde_yaml::to_string(&settings)
            .context("Failed to serialize default configuration")?;

        std::fs::write(path.as_ref(), yaml_content)
            .context("Failed to write example configuration file")?;

        Ok(())
    }
}
