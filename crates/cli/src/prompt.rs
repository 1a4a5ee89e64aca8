//! Interactive prompts

use inquire::{Confirm, InquireError, Select};
use types::{ActorError, Environment, Result};

/// Questions asked during a command
pub trait Prompter: Send + Sync {
    /// Ask which environment to operate on
    fn select_environment(&self) -> Result<Environment>;

    /// Ask a yes/no question
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Ask which workflow to run, `None` when the user cancels
    fn select_workflow(&self, workflows: &[String]) -> Result<Option<String>>;
}

/// Terminal prompts
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn select_environment(&self) -> Result<Environment> {
        Select::new("Select environment:", Environment::ALL.to_vec())
            .prompt()
            .map_err(prompt_error)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        match Confirm::new(message).with_default(default).prompt() {
            Ok(answer) => Ok(answer),
            Err(InquireError::OperationCanceled) => Ok(false),
            Err(e) => Err(prompt_error(e)),
        }
    }

    fn select_workflow(&self, workflows: &[String]) -> Result<Option<String>> {
        if workflows.is_empty() {
            return Err(ActorError::Prompt("No workflows available to select".to_string()));
        }

        match Select::new("Select a workflow to simulate (Esc to cancel):", workflows.to_vec()).prompt() {
            Ok(workflow) => Ok(Some(workflow)),
            Err(InquireError::OperationCanceled) => Ok(None),
            Err(e) => Err(prompt_error(e)),
        }
    }
}

fn prompt_error(e: InquireError) -> ActorError {
    ActorError::Prompt(e.to_string())
}
