//! Scraping modes selectable from the command line.
//!
//! Each mode is a single fetch → parse → aggregate pass with no state kept
//! between runs. Failures local to one item (a what's-new section, a PEP row)
//! are logged and the item is skipped; a page missing its expected structure
//! aborts the mode.

pub mod download;
pub mod latest_versions;
pub mod pep;
pub mod whats_new;

use clap::ValueEnum;

use crate::app::{AppContext, Result};
use crate::domain::ResultTable;

pub use download::{download, DownloadReport};
pub use latest_versions::latest_versions;
pub use pep::{pep, PepReport, StatusMismatch};
pub use whats_new::whats_new;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Release notes of every Python version
    WhatsNew,
    /// Documentation versions and their status
    LatestVersions,
    /// Download the A4 PDF documentation archive
    Download,
    /// Tally PEP statuses and check them against the index
    Pep,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}

#[derive(Debug)]
pub enum ModeOutput {
    Table(ResultTable),
    Downloaded(DownloadReport),
}

pub async fn run_mode(ctx: &AppContext, mode: Mode) -> Result<ModeOutput> {
    tracing::info!(mode = mode.as_str(), workers = ctx.workers(), "Running mode");

    match mode {
        Mode::WhatsNew => whats_new(ctx).await.map(ModeOutput::Table),
        Mode::LatestVersions => latest_versions(ctx).await.map(ModeOutput::Table),
        Mode::Download => download(ctx).await.map(ModeOutput::Downloaded),
        Mode::Pep => pep(ctx).await.map(|report| ModeOutput::Table(report.table)),
    }
}
