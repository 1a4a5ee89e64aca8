//! Settings schema definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use types::{Credentials, EnvironmentMap, Repository};

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Remote secret store configuration
    #[serde(default)]
    pub github: GithubConfig,
    /// Environment file configuration
    #[serde(default)]
    pub env: EnvConfig,
    /// Workflow simulation configuration
    #[serde(default)]
    pub workflows: WorkflowsConfig,
    /// Secret publisher configuration
    #[serde(default)]
    pub publisher: PublisherConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote secret store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Repository owner
    #[serde(default = "default_owner")]
    pub owner: String,
    /// Repository name
    #[serde(default = "default_repo")]
    pub repo: String,
    /// API token (usually from `GITHUB_TOKEN`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Encryption key id (usually from `ENCRYPTION_KEY_ID`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_key_id: Option<String>,
}

/// Environment file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Directory holding the `dotenv.<environment>` files
    #[serde(default = "default_env_directory")]
    pub directory: String,
    /// File name prefix, the environment name is appended
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// Schema document used by `validate` and the validation hook
    #[serde(default = "default_schema_path")]
    pub schema_path: String,
    /// API key default (usually from `API_KEY`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Values every loaded environment starts from
    #[serde(default = "default_env_defaults")]
    pub defaults: BTreeMap<String, String>,
}

/// Workflow simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowsConfig {
    /// Directory scanned for workflow files
    #[serde(default = "default_workflows_directory")]
    pub directory: String,
    /// Runner binary
    #[serde(default = "default_runner")]
    pub runner: String,
}

/// Secret publisher configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// Per-request timeout, unset means wait indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_seconds: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (compact, pretty, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Force debug output (`DEBUG=true`)
    #[serde(default)]
    pub debug: bool,
}

// Default value functions
fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_owner() -> String {
    "sujii".to_string()
}

fn default_repo() -> String {
    "actorcli".to_string()
}

fn default_env_directory() -> String {
    ".".to_string()
}

fn default_file_prefix() -> String {
    "dotenv.".to_string()
}

fn default_schema_path() -> String {
    ".env.schema.json".to_string()
}

fn default_env_defaults() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("APP_ENV".to_string(), "development".to_string()),
        ("APP_NAME".to_string(), "actorCLI".to_string()),
    ])
}

fn default_workflows_directory() -> String {
    ".github/workflows".to_string()
}

fn default_runner() -> String {
    "act".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl Settings {
    /// Repository secrets are written to
    pub fn repository(&self) -> Repository {
        Repository::new(&self.github.owner, &self.github.repo)
    }

    /// Credentials for the secret store, empty when not configured
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.github.token.clone().unwrap_or_default(),
            self.github.encryption_key_id.clone().unwrap_or_default(),
        )
    }

    /// Values a loaded environment is merged over
    pub fn env_defaults(&self) -> EnvironmentMap {
        let mut defaults: Vec<(String, String)> = self
            .env
            .defaults
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Some(ref api_key) = self.env.api_key {
            defaults.push(("API_KEY".to_string(), api_key.clone()));
        }
        if let Some(ref token) = self.github.token {
            defaults.push(("GITHUB_TOKEN".to_string(), token.clone()));
        }
        defaults.into_iter().collect()
    }

    /// Path of the environment file for `environment`
    pub fn env_file_path(&self, environment: &str) -> PathBuf {
        PathBuf::from(&self.env.directory).join(format!("{}{}", self.env.file_prefix, environment))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            github: GithubConfig::default(),
            env: EnvConfig::default(),
            workflows: WorkflowsConfig::default(),
            publisher: PublisherConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            owner: default_owner(),
            repo: default_repo(),
            token: None,
            encryption_key_id: None,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            directory: default_env_directory(),
            file_prefix: default_file_prefix(),
            schema_path: default_schema_path(),
            api_key: None,
            defaults: default_env_defaults(),
        }
    }
}

impl Default for WorkflowsConfig {
    fn default() -> Self {
        Self {
            directory: default_workflows_directory(),
            runner: default_runner(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            debug: false,
        }
    }
}
