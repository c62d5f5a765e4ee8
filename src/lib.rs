//! # pydoc-scraper
//!
//! Scrapes docs.python.org and the PEP index into small result tables and
//! downloads the PDF documentation archive.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher (cache, retry) → Extract → Mode → Output
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Release notes of every Python version, as an ASCII table
//! pydoc-scraper whats-new -o pretty
//!
//! # PEP status tally saved as CSV, with a fresh cache
//! pydoc-scraper pep -c -o file
//!
//! # A4 PDF documentation archive
//! pydoc-scraper download
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the config,
/// fetchers and response cache shared by every mode.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/pydoc-scraper/config.toml`.
pub mod config;

/// Status code table, result tables and the ordered status tally.
pub mod domain;

/// Tag lookup, table rows and PEP status extraction over parsed HTML.
pub mod extract;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for page and stream fetches
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation with retries
/// - [`CachedFetcher`](fetcher::CachedFetcher): on-disk response cache in front of another fetcher
/// - [`ParallelFetcher`](fetcher::ParallelFetcher): bounded, order-preserving fan-out
pub mod fetcher;

/// Console and per-run file logging.
pub mod logging;

/// The four scraping modes.
pub mod modes;

/// Plain, pretty and CSV output of result tables.
pub mod output;

/// Progress bars for detail-page fan-outs and the archive download.
pub mod progress;
