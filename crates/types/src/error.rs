//! Error types for the actor CLI

use thiserror::Error;

/// Main error type for the actor CLI
#[derive(Error, Debug)]
pub enum ActorError {
    /// Settings related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A config, schema or environment file does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// A file exists but could not be read
    #[error("File not readable: {path}: {reason}")]
    NotReadable { path: String, reason: String },

    /// Malformed schema document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Environment validation failed, carries every violation
    #[error("Environment validation failed:\n{}", bullet_list(.violations))]
    ValidationFailed { violations: Vec<String> },

    /// Token or encryption key id absent
    #[error("Missing credential: {name} is not set")]
    MissingCredential { name: String },

    /// A single secret could not be published
    #[error("Failed to publish secret {key}: {reason}")]
    PublishFailed { key: String, reason: String },

    /// The workflow runner binary is not installed
    #[error("External tool not found: {tool}")]
    ExternalToolMissing { tool: String },

    /// The workflow runner exited unsuccessfully
    #[error("External tool {tool} failed: {}", exit_description(.code))]
    ExternalToolFailed { tool: String, code: Option<i32> },

    /// Requested workflow is not in the workflows directory
    #[error("Workflow \"{name}\" not found")]
    WorkflowNotFound { name: String },

    /// Workflows directory is missing
    #[error("Workflows directory not found: {path}")]
    WorkflowsDirNotFound { path: String },

    /// Unknown environment name
    #[error("Invalid environment \"{value}\". Please choose one of: development, staging, production")]
    InvalidEnvironment { value: String },

    /// Interactive prompt errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for actor operations
pub type Result<T> = std::result::Result<T, ActorError>;

/// Configuration specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// File exists but cannot be read
    #[error("Configuration file not readable: {path}: {reason}")]
    NotReadable { path: String, reason: String },

    /// Parse error
    #[error("Configuration parse error: {0}")]
    ParseError(String),

    /// Validation error
    #[error("Configuration validation error: {field}: {message}")]
    ValidationError { field: String, message: String },

    /// Missing required field
    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },
}

/// Secret publishing specific errors
#[derive(Error, Debug)]
pub enum PublishError {
    /// Secret store answered with a non-success status
    #[error("HTTP error for secret {key}: {status}")]
    HttpError { key: String, status: u16, body: String },

    /// Request never produced a response
    #[error("Transport error for secret {key}: {message}")]
    Transport { key: String, message: String },

    /// Request exceeded the configured timeout
    #[error("Request timeout for secret {key}")]
    Timeout { key: String },
}

impl PublishError {
    /// The secret name this error belongs to
    pub fn key(&self) -> &str {
        match self {
            PublishError::HttpError { key, .. }
            | PublishError::Transport { key, .. }
            | PublishError::Timeout { key } => key,
        }
    }

    /// Short human readable reason, without the key
    pub fn reason(&self) -> String {
        match self {
            PublishError::HttpError { status, body, .. } if body.is_empty() => {
                format!("HTTP {}", status)
            }
            PublishError::HttpError { status, body, .. } => format!("HTTP {}: {}", status, body),
            PublishError::Transport { message, .. } => message.clone(),
            PublishError::Timeout { .. } => "request timed out".to_string(),
        }
    }
}

/// Workflow simulation specific errors
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Runner binary could not be spawned
    #[error("{tool} is not installed")]
    ToolMissing { tool: String },

    /// Runner exited unsuccessfully
    #[error("{tool} process {}", exit_description(.code))]
    ToolFailed { tool: String, code: Option<i32> },

    /// Workflows directory is missing
    #[error("Workflows directory not found: {path}")]
    WorkflowsDirNotFound { path: String },

    /// Requested workflow does not exist
    #[error("Workflow \"{name}\" not found")]
    WorkflowNotFound { name: String },

    /// Any other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Hook pipeline specific errors
#[derive(Error, Debug)]
pub enum HookError {
    /// Validation hook rejected the environment
    #[error("{hook}: environment validation failed:\n{}", bullet_list(.violations))]
    Validation { hook: String, violations: Vec<String> },
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with code {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

// Conversion implementations for common error types

impl From<ConfigError> for ActorError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::FileNotFound { path } => ActorError::FileNotFound { path },
            ConfigError::NotReadable { path, reason } => ActorError::NotReadable { path, reason },
            ConfigError::ParseError(message) => ActorError::Parse(message),
            other => ActorError::Config(other.to_string()),
        }
    }
}

impl From<PublishError> for ActorError {
    fn from(err: PublishError) -> Self {
        ActorError::PublishFailed {
            key: err.key().to_string(),
            reason: err.reason(),
        }
    }
}

impl From<SimulationError> for ActorError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::ToolMissing { tool } => ActorError::ExternalToolMissing { tool },
            SimulationError::ToolFailed { tool, code } => ActorError::ExternalToolFailed { tool, code },
            SimulationError::WorkflowsDirNotFound { path } => ActorError::WorkflowsDirNotFound { path },
            SimulationError::WorkflowNotFound { name } => ActorError::WorkflowNotFound { name },
            SimulationError::Io(e) => ActorError::Internal(e.to_string()),
        }
    }
}

impl From<HookError> for ActorError {
    fn from(err: HookError) -> Self {
        match err {
            HookError::Validation { violations, .. } => ActorError::ValidationFailed { violations },
        }
    }
}
