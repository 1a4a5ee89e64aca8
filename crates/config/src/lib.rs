//! Configuration management for the actor CLI
//!
//! This crate handles the tool's own settings (YAML files and environment
//! variables), reading `KEY=VALUE` environment files, and validating parsed
//! environments against rule sets or a schema document.

pub mod env_schema;
pub mod envfile;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env_schema::EnvSchema;
pub use envfile::{load_env, parse_env, read_env_file, serialize_env, LoadedEnv};
pub use loader::ConfigLoader;
pub use schema::*;
pub use validation::*;
