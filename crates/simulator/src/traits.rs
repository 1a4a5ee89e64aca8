//! Workflow runner traits and interfaces

use async_trait::async_trait;
use std::path::Path;
use types::SimulationError;

/// Trait for tools that execute workflow files locally
#[async_trait]
pub trait WorkflowRunner: Send + Sync {
    /// Check if the runner is installed and responds
    async fn is_available(&self) -> bool;

    /// Run a single workflow file, streaming its output to the terminal
    async fn run(&self, workflow: &Path, extra_args: &[String]) -> Result<(), SimulationError>;

    /// Install the runner with the platform package manager
    async fn install(&self) -> Result<(), SimulationError>;

    /// Get the name of the runner
    fn name(&self) -> &str;
}
