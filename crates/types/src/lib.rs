//! Shared types for the actor CLI
//!
//! This crate contains the domain types passed between the configuration,
//! hook, publishing and simulation crates.

pub mod env;
pub mod error;
pub mod sync;
pub mod utils;

// Re-export commonly used types
pub use env::{Environment, EnvironmentMap};
pub use error::{ActorError, ConfigError, HookError, PublishError, Result, SimulationError};
pub use sync::{Credentials, KeyOutcome, KeyStatus, Repository, SyncOutcome};
