use crate::app::{AppContext, Result};
use crate::domain::{ResultTable, StatusTally};
use crate::extract::{extract_rows, extract_status, parse_row, ParsedRow};

/// A PEP whose page disagrees with its index abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMismatch {
    pub link: String,
    pub found: String,
    pub expected: &'static [&'static str],
}

/// Compare a detail-page status against the statuses its row accepts.
pub fn check_status(row: &ParsedRow, found: &str) -> Option<StatusMismatch> {
    if row.accepted.contains(&found) {
        return None;
    }
    Some(StatusMismatch {
        link: row.link.clone(),
        found: found.to_string(),
        expected: row.accepted,
    })
}

#[derive(Debug)]
pub struct PepReport {
    pub table: ResultTable,
    pub mismatches: Vec<StatusMismatch>,
    /// Rows dropped because the row or its page could not be read
    pub skipped: usize,
}

pub async fn pep(ctx: &AppContext) -> Result<PepReport> {
    let mut skipped = 0;

    let rows: Vec<ParsedRow> = {
        let doc = ctx.fetch_document(ctx.peps_url.as_str()).await?;
        let extraction = extract_rows(&doc)?;
        tracing::info!(
            tables = extraction.table_count,
            rows = extraction.rows.len(),
            "Parsed PEP index"
        );
        for table_index in &extraction.skipped_tables {
            tracing::warn!(table = table_index, "Table has no body, skipping");
        }

        extraction
            .rows
            .iter()
            .filter_map(|(table_index, row)| match parse_row(*row, *table_index, &ctx.peps_url) {
                Ok(parsed) => {
                    tracing::debug!(
                        table = table_index,
                        abbreviation = %parsed.abbreviation,
                        link = %parsed.link,
                        "Parsed row"
                    );
                    Some(parsed)
                }
                Err(e) => {
                    tracing::warn!("Skipping row: {}", e);
                    skipped += 1;
                    None
                }
            })
            .collect()
    };

    let progress = ctx.progress_items(rows.len(), "pep");
    let statuses: Vec<(ParsedRow, Result<String>)> = ctx
        .parallel_fetcher
        .map_ordered(rows, &progress, |fetcher, row: ParsedRow| async move {
            let status = extract_status(fetcher.as_ref(), &row.link).await;
            (row, status)
        })
        .await;
    progress.finish(None);

    let mut tally = StatusTally::new();
    let mut mismatches = Vec::new();

    for (row, status) in statuses {
        let status = match status {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(link = %row.link, "Skipping PEP: {}", e);
                skipped += 1;
                continue;
            }
        };

        if let Some(mismatch) = check_status(&row, &status) {
            tracing::warn!(
                link = %mismatch.link,
                found = %mismatch.found,
                expected = ?mismatch.expected,
                "Status mismatch"
            );
            mismatches.push(mismatch);
        }
        tally.record(&status);
    }

    tracing::info!(
        total = tally.total(),
        mismatches = mismatches.len(),
        skipped,
        "PEP statuses tallied"
    );

    Ok(PepReport {
        table: tally.into_table(),
        mismatches,
        skipped,
    })
}
