use thiserror::Error;

use crate::config::ConfigError;
use crate::fetcher::FetchError;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Tag not found: <{tag}> {attrs}")]
    TagNotFound { tag: String, attrs: String },

    #[error("No tables found on the page")]
    NoTables,

    #[error("Malformed row in table {table_index}: {reason}")]
    RowParse { table_index: usize, reason: String },

    #[error("Status not found on {0}")]
    StatusNotFound(String),

    #[error("Version list not found in the sidebar")]
    VersionListNotFound,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
