//! Main application structure and command handlers

use crate::command::{Command, ListFormat};
use crate::output::{render_sync_outcome, render_workflows};
use crate::prompt::Prompter;
use anyhow::{bail, Context, Result};
use config::{
    builtin_rules, load_env, ConfigLoader, EnvSchema, LoadedEnv, SchemaValidator, Settings, ValidationResult,
    ValidationRule,
};
use hooks::{HookPipeline, LoggingHook, ValidationHook};
use secret_client::{GithubSecretStore, SecretPublisher};
use simulator::{ActRunner, WorkflowCatalog, WorkflowInfo, WorkflowRunner};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};
use types::{ActorError, ConfigError, Environment, SyncOutcome};

/// Main application that coordinates all components
pub struct Application {
    settings: Settings,
    rules: Vec<ValidationRule>,
    pipeline: HookPipeline,
    publisher: SecretPublisher<GithubSecretStore>,
    runner: ActRunner,
    catalog: WorkflowCatalog,
    prompter: Box<dyn Prompter>,
}

impl Application {
    /// Create a new application instance
    pub async fn new(settings: Settings, prompter: Box<dyn Prompter>) -> Result<Self> {
        debug!("Initializing application components...");

        let rules = load_rules(&settings).await?;
        let pipeline = HookPipeline::new()
            .with_hook(LoggingHook::new())
            .with_hook(ValidationHook::new(rules.clone()));

        let timeout = settings.publisher.request_timeout_seconds.map(Duration::from_secs);
        let store = GithubSecretStore::new(&settings.github.api_url, timeout)
            .context("Failed to create secret store client")?;

        Ok(Self {
            rules,
            pipeline,
            publisher: SecretPublisher::new(store),
            runner: ActRunner::new(&settings.workflows.runner),
            catalog: WorkflowCatalog::new(&settings.workflows.directory),
            prompter,
            settings,
        })
    }

    /// Run one command to completion
    pub async fn execute(&self, command: Command) -> Result<()> {
        match command {
            Command::Load { env } => {
                self.load(env).await.context("Failed to load environment")?;
            }
            Command::Sync { env, force } => {
                let outcome = self.sync(env, force).await.context("Failed to sync environment")?;
                if let Some(outcome) = outcome {
                    print!("{}", render_sync_outcome(&outcome));
                    if !outcome.is_success() {
                        bail!(
                            "{} of {} secrets failed to synchronize",
                            outcome.failure_count(),
                            outcome.len()
                        );
                    }
                    info!("Environment synchronized successfully");
                }
            }
            Command::Simulate { workflow, runner_args } => {
                self.simulate(workflow.as_deref(), &runner_args)
                    .await
                    .context("Simulation error")?;
            }
            Command::List { format } => {
                if let Some(listing) = self.list(format).await.context("Failed to list workflows")? {
                    print!("{}", listing);
                }
            }
            Command::Validate { env_file } => {
                self.validate(&env_file)
                    .await?
                    .into_result()
                    .with_context(|| format!("{} is invalid", env_file.display()))?;
                println!("✓ {} is valid", env_file.display());
            }
            Command::Init { output, force } => {
                self.init(&output, force)?;
                println!("Wrote default settings to {}", output.display());
            }
        }
        Ok(())
    }

    /// Write the default settings to `output`
    pub fn init(&self, output: &Path, force: bool) -> Result<()> {
        if output.exists() && !force {
            bail!("{} already exists, pass --force to overwrite it", output.display());
        }
        ConfigLoader::create_example(output)
    }

    /// Read an environment file, merge defaults and run the hooks over it
    pub async fn load(&self, env: Option<Environment>) -> Result<LoadedEnv> {
        let environment = self.resolve_environment(env)?;
        if environment.is_production() {
            warn!("Loading production environment - please proceed with caution");
        }
        info!(environment = %environment, "Loading environment");

        let loaded = self.read_environment(environment).await?;
        self.pipeline
            .run_hooks(&loaded.resolved)
            .await
            .map_err(ActorError::from)?;

        info!(path = %loaded.path.display(), count = loaded.file.len(), "Environment loaded successfully");
        Ok(loaded)
    }

    /// Publish an environment file to the repository secrets
    ///
    /// Returns `None` when the user declines the production confirmation.
    pub async fn sync(&self, env: Option<Environment>, force: bool) -> Result<Option<SyncOutcome>> {
        let environment = self.resolve_environment(env)?;
        let credentials = self.settings.credentials();
        credentials.ensure_complete()?;

        let loaded = self.read_environment(environment).await?;

        if environment.is_production() && !force {
            let confirmed = self
                .prompter
                .confirm("Are you sure you want to sync production environment?", false)?;
            if !confirmed {
                info!("Sync cancelled");
                return Ok(None);
            }
        }

        self.pipeline
            .run_hooks(&loaded.resolved)
            .await
            .map_err(ActorError::from)?;

        let repository = self.settings.repository();
        info!(environment = %environment, repository = %repository, "Synchronizing environment variables");
        // defaults stay local, only the file's own entries become secrets
        let outcome = self
            .publisher
            .publish(&repository, &credentials, &loaded.file)
            .await?;

        Ok(Some(outcome))
    }

    /// Run a workflow locally
    ///
    /// Returns the workflow that ran, or `None` when there was nothing to run
    /// or the user cancelled the selection.
    pub async fn simulate(&self, workflow: Option<&str>, runner_args: &[String]) -> Result<Option<WorkflowInfo>> {
        self.ensure_runner().await?;

        let workflows = self.catalog.list().await.map_err(ActorError::from)?;
        if workflows.is_empty() {
            warn!(directory = %self.catalog.directory().display(), "No workflows found");
            return Ok(None);
        }

        let name = match workflow {
            Some(name) => name.to_string(),
            None => {
                let names: Vec<String> = workflows.iter().map(|w| w.name.clone()).collect();
                match self.prompter.select_workflow(&names)? {
                    Some(name) => name,
                    None => {
                        info!("Simulation cancelled");
                        return Ok(None);
                    }
                }
            }
        };

        let selected = self.catalog.find(&name).await.map_err(ActorError::from)?;

        info!(workflow = %selected.name, "Preparing to simulate workflow");
        warn!("This will execute the workflow in your local environment");
        self.runner
            .run(&selected.path, runner_args)
            .await
            .map_err(ActorError::from)
            .context("Workflow simulation failed")?;

        info!(workflow = %selected.name, "Workflow simulation completed successfully");
        Ok(Some(selected))
    }

    /// Render the available workflows, `None` when there are none
    pub async fn list(&self, format: ListFormat) -> Result<Option<String>> {
        let workflows = self.catalog.list().await.map_err(ActorError::from)?;
        if workflows.is_empty() {
            warn!(
                directory = %self.catalog.directory().display(),
                "No workflow files found"
            );
            return Ok(None);
        }
        render_workflows(&workflows, format).map(Some)
    }

    /// Check an environment file against the rule set without running hooks
    pub async fn validate(&self, env_file: &Path) -> Result<ValidationResult> {
        let loaded = load_env(env_file, &self.settings.env_defaults()).await?;
        Ok(SchemaValidator::validate(&loaded.resolved, &self.rules))
    }

    fn resolve_environment(&self, env: Option<Environment>) -> Result<Environment> {
        match env {
            Some(environment) => Ok(environment),
            None => Ok(self.prompter.select_environment()?),
        }
    }

    async fn read_environment(&self, environment: Environment) -> Result<LoadedEnv> {
        let path = self.settings.env_file_path(environment.as_str());
        Ok(load_env(&path, &self.settings.env_defaults()).await?)
    }

    /// Make sure the runner is installed, offering to install it
    async fn ensure_runner(&self) -> Result<()> {
        if self.runner.is_available().await {
            return Ok(());
        }

        let tool = self.runner.name().to_string();
        let install = self
            .prompter
            .confirm(&format!("`{}` is not installed. Do you want to install it?", tool), true)?;
        if !install {
            warn!("`{}` is required to run simulations. Please install it manually.", tool);
            return Err(ActorError::ExternalToolMissing { tool }.into());
        }

        info!(tool = %tool, "Installing runner");
        self.runner
            .install()
            .await
            .map_err(ActorError::from)
            .with_context(|| format!("Failed to install {}", tool))?;

        if !self.runner.is_available().await {
            warn!("`{}` is still unavailable after installation", tool);
            return Err(ActorError::ExternalToolMissing { tool }.into());
        }
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Rules from the schema document, or the built-in ones when there is none
async fn load_rules(settings: &Settings) -> Result<Vec<ValidationRule>> {
    match EnvSchema::load(&settings.env.schema_path).await {
        Ok(schema) => {
            info!(path = %settings.env.schema_path, "Using environment schema");
            Ok(schema.into_rules())
        }
        Err(ConfigError::FileNotFound { .. }) => {
            debug!("No environment schema, using built-in rules");
            Ok(builtin_rules())
        }
        Err(e) => Err(ActorError::from(e)).context("Failed to load environment schema"),
    }
}
