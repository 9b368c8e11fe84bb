use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use hey::cli::{Cli, execute};
use hey::config::ConfigLoader;
use hey::logger::init_logger;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Configuration and logging problems are fatal before the command runs
    let loader = ConfigLoader::new();
    let settings = loader.load().context("Failed to load configuration")?;

    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .context("Invalid logger configuration")?;
    init_logger(logger_config).context("Failed to initialize logger")?;

    match loader.resolve_path() {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "loaded configuration file"),
        _ => tracing::debug!("no configuration file found, using defaults"),
    }

    let status = execute(cli, &settings).await;
    Ok(ExitCode::from(status))
}
