//! Hook pipeline run over every loaded environment
//!
//! Hooks are a closed set: a logging hook that prints the snapshot with
//! sensitive values redacted, and a validation hook that checks it against a
//! rule set. The pipeline runs them in registration order and stops at the
//! first failure.

pub mod logging;
pub mod pipeline;
pub mod validation;

pub use logging::*;
pub use pipeline::*;
pub use validation::*;
