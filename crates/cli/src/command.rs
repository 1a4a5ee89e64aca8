//! Command-line surface

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use types::Environment;

#[derive(Debug, Parser)]
#[command(name = "actor", version)]
#[command(about = "A CLI tool for managing GitHub Actions workflows and environment variables")]
pub struct Cli {
    /// Settings file, used when present
    #[arg(long, global = true, default_value = "actor.yaml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load environment variables for a specific environment
    Load {
        /// Target environment (development/staging/production)
        #[arg(long, short = 'e')]
        env: Option<Environment>,
    },
    /// Synchronize environment variables to repository secrets
    Sync {
        /// Target environment (development/staging/production)
        #[arg(long, short = 'e')]
        env: Option<Environment>,
        /// Skip the production confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
    /// Simulate a GitHub Actions workflow locally using act
    Simulate {
        /// Workflow file name to simulate
        #[arg(long, short = 'w')]
        workflow: Option<String>,
        /// Extra arguments passed through to the runner
        #[arg(last = true)]
        runner_args: Vec<String>,
    },
    /// List available workflows
    List {
        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },
    /// Validate an environment file against the schema
    Validate {
        /// Path to the environment file
        #[arg(long, default_value = ".env")]
        env_file: PathBuf,
    },
    /// Write a settings file with the default values
    Init {
        /// Destination of the settings file
        #[arg(long, short = 'o', default_value = "actor.yaml")]
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Simple,
    Json,
    Table,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sync() {
        let cli = Cli::try_parse_from(["actor", "sync", "-e", "production", "--force"]).unwrap();
        match cli.command {
            Command::Sync { env, force } => {
                assert_eq!(env, Some(Environment::Production));
                assert!(force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.config, PathBuf::from("actor.yaml"));
    }

    #[test]
    fn test_invalid_environment_is_rejected() {
        assert!(Cli::try_parse_from(["actor", "load", "--env", "qa"]).is_err());
    }

    #[test]
    fn test_list_defaults_to_table() {
        let cli = Cli::try_parse_from(["actor", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List { format: ListFormat::Table }));

        let cli = Cli::try_parse_from(["actor", "--config", "ci.yaml", "list", "-f", "json"]).unwrap();
        assert!(matches!(cli.command, Command::List { format: ListFormat::Json }));
        assert_eq!(cli.config, PathBuf::from("ci.yaml"));
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["actor", "init", "-o", "custom.yaml"]).unwrap();
        match cli.command {
            Command::Init { output, force } => {
                assert_eq!(output, PathBuf::from("custom.yaml"));
                assert!(!force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_simulate_passes_runner_args() {
        let cli = Cli::try_parse_from(["actor", "simulate", "-w", "ci.yml", "--", "--job", "build"]).unwrap();
        match cli.command {
            Command::Simulate { workflow, runner_args } => {
                assert_eq!(workflow.as_deref(), Some("ci.yml"));
                assert_eq!(runner_args, ["--job", "build"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
