use anyhow::{Context, Result};
use clap::Parser;
use recruiter_form::cli::{handle_command, Cli, Command};
use recruiter_form::AppConfig;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{info, warn};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Offline validation runs without any backend configuration
    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => Some(config),
        Err(e) if matches!(cli.command, Command::Validate { .. }) => {
            init_logging(None)?;
            warn!("No backend configuration: {:#}", e);
            return handle_command(cli, None).await;
        }
        Err(e) => return Err(e),
    };

    init_logging(config.as_ref().and_then(|c| c.log_file.as_deref()))?;

    if let Some(config) = &config {
        info!("Backend: {}", config.api_base_url);
        info!("Form view: {}", config.form_view);
    }

    handle_command(cli, config).await
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true) // Clear file on startup
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(file)
                        .with_current_span(false)
                        .with_span_list(false),
                )
                .with(filter)
                .try_init()?;
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .with(filter)
                .try_init()?;
        }
    }

    Ok(())
}
