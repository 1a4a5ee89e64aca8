//! Workflow runner implementations

use crate::traits::WorkflowRunner;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use types::SimulationError;

const ACT_PACKAGE: &str = "act";

/// Runner backed by the `act` binary
#[derive(Debug, Clone)]
pub struct ActRunner {
    program: String,
}

impl ActRunner {
    /// Create a new runner invoking `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments passed to the runner for one workflow
    pub fn run_args(workflow: &Path, extra_args: &[String]) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            "-W".to_string(),
            workflow.display().to_string(),
        ];
        args.extend(extra_args.iter().cloned());
        args
    }

    /// Package manager command installing `act` on this platform
    pub fn install_command() -> (&'static str, Vec<String>) {
        let manager = if cfg!(windows) { "choco" } else { "brew" };
        (manager, vec!["install".to_string(), ACT_PACKAGE.to_string()])
    }
}

impl Default for ActRunner {
    fn default() -> Self {
        Self::new(ACT_PACKAGE)
    }
}

#[async_trait]
impl WorkflowRunner for ActRunner {
    async fn is_available(&self) -> bool {
        let status = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::debug!(runner = %self.program, error = %e, "Runner not available");
                false
            }
        }
    }

    async fn run(&self, workflow: &Path, extra_args: &[String]) -> Result<(), SimulationError> {
        let args = Self::run_args(workflow, extra_args);
        tracing::info!(runner = %self.program, workflow = %workflow.display(), "Running workflow");
        run_inherited(&self.program, &args).await
    }

    async fn install(&self) -> Result<(), SimulationError> {
        let (manager, args) = Self::install_command();
        tracing::info!(manager = %manager, runner = %self.program, "Installing runner");
        run_inherited(manager, &args).await
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Spawn `program` with the terminal attached and wait for it
async fn run_inherited(program: &str, args: &[String]) -> Result<(), SimulationError> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => SimulationError::ToolMissing {
                tool: program.to_string(),
            },
            _ => SimulationError::Io(e),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(SimulationError::ToolFailed {
            tool: program.to_string(),
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const MISSING_BINARY: &str = "actor-test-runner-that-does-not-exist";

    #[test]
    fn test_run_args() {
        let args = ActRunner::run_args(
            &PathBuf::from(".github/workflows/ci.yml"),
            &["--job".to_string(), "build".to_string()],
        );
        assert_eq!(args, ["run", "-W", ".github/workflows/ci.yml", "--job", "build"]);
    }

    #[test]
    fn test_install_command() {
        let (manager, args) = ActRunner::install_command();
        assert_eq!(manager, if cfg!(windows) { "choco" } else { "brew" });
        assert_eq!(args, ["install", "act"]);
    }

    #[test]
    fn test_configured_runner_path_still_installs_act() {
        let runner = ActRunner::new("/usr/local/bin/act");
        assert_eq!(runner.name(), "/usr/local/bin/act");
        assert_eq!(ActRunner::install_command().1, ["install", "act"]);
    }

    #[tokio::test]
    async fn test_missing_binary_is_unavailable() {
        let runner = ActRunner::new(MISSING_BINARY);
        assert!(!runner.is_available().await);
    }

    #[tokio::test]
    async fn test_missing_binary_maps_to_tool_missing() {
        let runner = ActRunner::new(MISSING_BINARY);
        let err = runner.run(Path::new("ci.yml"), &[]).await.unwrap_err();

        match err {
            SimulationError::ToolMissing { tool } => assert_eq!(tool, MISSING_BINARY),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_maps_to_tool_failed() {
        let runner = ActRunner::new("false");
        let err = runner.run(Path::new("ci.yml"), &[]).await.unwrap_err();

        match err {
            SimulationError::ToolFailed { tool, code } => {
                assert_eq!(tool, "false");
                assert_eq!(code, Some(1));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_run() {
        let runner = ActRunner::new("true");
        assert!(runner.is_available().await);
        assert!(runner.run(Path::new("ci.yml"), &[]).await.is_ok());
    }
}
