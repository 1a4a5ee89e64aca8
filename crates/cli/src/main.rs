//! actor - environment sync and workflow simulation CLI

use anyhow::{Context, Result};
use clap::Parser;
use config::{ConfigLoader, LoggingConfig};
use std::io::ErrorKind;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod command;
mod output;
mod prompt;

use app::Application;
use command::Cli;
use prompt::InquirePrompter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before settings so its variables take part in layering
    let dotenv_result = dotenv::dotenv();

    let cli = Cli::parse();

    let settings = ConfigLoader::load_or_default(&cli.config).context("Failed to load configuration")?;

    init_logging(&settings.logging)?;

    match dotenv_result {
        Ok(path) => debug!(path = %path.display(), "Loaded environment variables from .env file"),
        Err(dotenv::Error::Io(ref e)) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Could not load .env file: {}", e),
    }

    debug!("Starting actor v{}", env!("CARGO_PKG_VERSION"));
    info!(repository = %settings.repository(), "Configuration loaded");

    let app = Application::new(settings, Box::new(InquirePrompter))
        .await
        .context("Failed to create application")?;

    if let Err(e) = app.execute(cli.command).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize logging from settings, `RUST_LOG` taking precedence
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let log_level = if logging.debug { "debug" } else { logging.level.as_str() };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match logging.format.as_str() {
        "pretty" => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
        _ => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .context("Failed to initialize logging")?;
        }
    }

    if logging.debug {
        debug!("Debug logging enabled");
    }

    Ok(())
}
