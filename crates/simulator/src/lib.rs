//! Local workflow simulation
//!
//! This crate wraps the external workflow runner used to execute CI
//! workflow files locally and lists the workflow files available to it.

pub mod engine;
pub mod traits;
pub mod workflows;

pub use engine::*;
pub use traits::*;
pub use workflows::*;
