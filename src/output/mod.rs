//! Rendering of result tables: plain console lines, an ASCII table, or a CSV
//! file under the results directory.

pub mod file;

use std::path::Path;

use clap::ValueEnum;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::app::Result;
use crate::domain::ResultTable;
use crate::modes::Mode;

pub use file::{file_output, results_file_name, write_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bordered ASCII table
    Pretty,
    /// CSV file in the results directory
    File,
}

/// One line per record, cells separated by a single space.
pub fn render_plain(table: &ResultTable) -> String {
    table
        .records()
        .map(|record| record.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_pretty(table: &ResultTable) -> String {
    let mut builder = Builder::default();
    for record in table.records() {
        builder.push_record(record.iter().map(String::as_str));
    }
    let mut rendered = builder.build();
    rendered.with(Style::ascii());
    rendered.to_string()
}

/// Send `table` to the sink selected on the command line.
pub fn control_output(
    table: &ResultTable,
    format: Option<OutputFormat>,
    mode: Mode,
    results_dir: &Path,
) -> Result<()> {
    match format {
        None => println!("{}", render_plain(table)),
        Some(OutputFormat::Pretty) => println!("{}", render_pretty(table)),
        Some(OutputFormat::File) => {
            file_output(table, mode, results_dir)?;
        }
    }
    Ok(())
}
