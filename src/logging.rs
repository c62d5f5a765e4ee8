use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// `pydoc-scraper_{YYYY-MM-DD_HH-MM-SS}.log`
pub fn log_file_name() -> String {
    format!(
        "{}_{}.log",
        env!("CARGO_PKG_NAME"),
        Local::now().format("%Y-%m-%d_%H-%M-%S")
    )
}

/// Install the global subscriber: console on stderr plus a per-run log file
/// in `logs_dir`. `RUST_LOG` overrides the default `info` filter.
pub fn init(logs_dir: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(logs_dir)?;
    let path = logs_dir.join(log_file_name());
    let file = File::create(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .map_err(io::Error::other)?;

    Ok(path)
}
