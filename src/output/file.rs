use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::app::Result;
use crate::domain::ResultTable;
use crate::modes::Mode;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// `{mode}_{YYYY-MM-DD_HH-MM-SS}.csv`
pub fn results_file_name(mode: Mode, at: DateTime<Local>) -> String {
    format!("{}_{}.csv", mode.as_str(), at.format(TIMESTAMP_FORMAT))
}

/// Write header and rows of `table` to `path` as UTF-8 CSV.
pub fn write_csv(table: &ResultTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in table.records() {
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save `table` in `results_dir` under a timestamped name and return the path.
pub fn file_output(table: &ResultTable, mode: Mode, results_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(results_dir)?;
    let path = results_dir.join(results_file_name(mode, Local::now()));
    write_csv(table, &path)?;
    tracing::info!(path = %path.display(), "Results saved");
    Ok(path)
}
