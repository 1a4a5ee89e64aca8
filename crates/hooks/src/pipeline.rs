//! Ordered hook registration and execution

use crate::{LoggingHook, ValidationHook};
use types::{EnvironmentMap, HookError};

/// Closed set of hooks
#[derive(Debug)]
pub enum Hook {
    Logging(LoggingHook),
    Validation(ValidationHook),
}

impl Hook {
    /// Run the hook over the snapshot
    pub async fn run(&self, env: &EnvironmentMap) -> Result<(), HookError> {
        match self {
            Hook::Logging(hook) => hook.run(env).await,
            Hook::Validation(hook) => hook.run(env).await,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Hook::Logging(hook) => hook.name(),
            Hook::Validation(hook) => hook.name(),
        }
    }
}

impl From<LoggingHook> for Hook {
    fn from(hook: LoggingHook) -> Self {
        Hook::Logging(hook)
    }
}

impl From<ValidationHook> for Hook {
    fn from(hook: ValidationHook) -> Self {
        Hook::Validation(hook)
    }
}

/// Hooks run in registration order over every loaded environment
#[derive(Debug, Default)]
pub struct HookPipeline {
    hooks: Vec<Hook>,
}

impl HookPipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook
    pub fn add_hook(&mut self, hook: impl Into<Hook>) {
        self.hooks.push(hook.into());
    }

    /// Builder form of [`HookPipeline::add_hook`]
    pub fn with_hook(mut self, hook: impl Into<Hook>) -> Self {
        self.add_hook(hook);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook in order, stopping at the first failure
    pub async fn run_hooks(&self, env: &EnvironmentMap) -> Result<(), HookError> {
        for hook in &self.hooks {
            tracing::debug!(hook = %hook.name(), "Running hook");
            hook.run(env).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::SharedBuffer;
    use config::ValidationRule;

    fn env() -> EnvironmentMap {
        [("APP_ENV", "development")].into_iter().collect()
    }

    #[tokio::test]
    async fn test_hooks_run_in_registration_order() {
        let buffer = SharedBuffer::default();
        let pipeline = HookPipeline::new()
            .with_hook(LoggingHook::with_writer(buffer.clone()).with_heading("A"))
            .with_hook(LoggingHook::with_writer(buffer.clone()).with_heading("B"));

        pipeline.run_hooks(&env()).await.unwrap();

        assert_eq!(
            buffer.contents(),
            "A\n  APP_ENV: development\nB\n  APP_ENV: development\n"
        );
    }

    #[tokio::test]
    async fn test_failure_stops_later_hooks() {
        let buffer = SharedBuffer::default();
        let mut pipeline = HookPipeline::new();
        pipeline.add_hook(ValidationHook::new(vec![ValidationRule::required("API_KEY")]));
        pipeline.add_hook(LoggingHook::with_writer(buffer.clone()));
        assert_eq!(pipeline.len(), 2);

        let err = pipeline.run_hooks(&env()).await.unwrap_err();

        let HookError::Validation { violations, .. } = err;
        assert_eq!(violations, ["missing required variable `API_KEY`"]);
        assert!(buffer.contents().is_empty());
    }

    #[tokio::test]
    async fn test_empty_pipeline_succeeds() {
        let pipeline = HookPipeline::new();
        assert!(pipeline.is_empty());
        assert!(pipeline.run_hooks(&env()).await.is_ok());
    }
}
