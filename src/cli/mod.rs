pub mod commands;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError};
use crate::modes::Mode;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "pydoc-scraper", version)]
#[command(about = "Scrape the Python documentation and the PEP index", long_about = None)]
pub struct Cli {
    /// What to scrape
    #[arg(value_enum)]
    pub mode: Mode,

    /// Clear the HTTP response cache before running
    #[arg(short, long)]
    pub clear_cache: bool,

    /// Output format (default: plain lines on stdout)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Number of parallel workers for detail page fetches
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Path to the config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load the config file and apply command-line overrides.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(workers) = self.workers {
            config.http.workers = workers;
        }
        Ok(config)
    }
}
