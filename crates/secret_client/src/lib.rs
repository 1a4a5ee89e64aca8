//! Secret store client for publishing environment variables
//!
//! This crate writes environment variables to a repository's secret store,
//! one request per variable, all in flight at once, and reports a per-key
//! outcome for every run.

pub mod client;
pub mod publisher;
pub mod traits;

pub use client::*;
pub use publisher::*;
pub use traits::*;
