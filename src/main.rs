use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use pydoc_scraper::cli::{commands, Cli};
use pydoc_scraper::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Nothing is logged to file until the subscriber is installed
    let config = match cli.load_config().context("Failed to load config") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_path = match logging::init(&config.paths.logs_dir()).context("Failed to initialize logging") {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(log = %log_path.display(), "Scraper started");
    tracing::info!(mode = cli.mode.as_str(), ?cli, "Command line arguments");

    if let Err(e) = commands::run(&cli, config).await {
        tracing::error!("{}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!("Scraper finished");
    ExitCode::SUCCESS
}
