use scraper::{ElementRef, Html};
use url::Url;

use crate::app::{Result, ScrapeError};
use crate::domain::{abbreviation_key, expected_statuses};
use crate::extract::tags::{find_all, find_tag, text_of, TagQuery};

/// Body rows of every table on a page.
#[derive(Debug)]
pub struct RowExtraction<'a> {
    /// `(table index, row)` pairs; table indices start at 1
    pub rows: Vec<(usize, ElementRef<'a>)>,
    /// Tables that had no `<tbody>`
    pub skipped_tables: Vec<usize>,
    pub table_count: usize,
}

/// Collect body rows of every table, in table order then row order.
pub fn extract_rows(doc: &Html) -> Result<RowExtraction<'_>> {
    let tables = find_all(doc.root_element(), &TagQuery::new("table"));
    if tables.is_empty() {
        return Err(ScrapeError::NoTables);
    }

    let mut extraction = RowExtraction {
        rows: Vec::new(),
        skipped_tables: Vec::new(),
        table_count: tables.len(),
    };

    for (i, table) in tables.into_iter().enumerate() {
        let table_index = i + 1;
        let Some(body) = table
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "tbody")
        else {
            extraction.skipped_tables.push(table_index);
            continue;
        };

        extraction.rows.extend(
            body.children()
                .filter_map(ElementRef::wrap)
                .filter(|el| el.value().name() == "tr")
                .map(|row| (table_index, row)),
        );
    }

    Ok(extraction)
}

/// What one PEP index row says about its PEP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub table_index: usize,
    pub abbreviation: String,
    pub accepted: &'static [&'static str],
    pub link: String,
}

/// Read the status abbreviation and the absolute detail link from a row.
pub fn parse_row(row: ElementRef, table_index: usize, base: &Url) -> Result<ParsedRow> {
    let row_error = |reason: &str| ScrapeError::RowParse {
        table_index,
        reason: reason.to_string(),
    };

    let cells = find_all(row, &TagQuery::new("td"));
    if cells.len() < 2 {
        return Err(row_error(&format!("expected at least 2 cells, found {}", cells.len())));
    }

    let abbreviation = abbreviation_key(&text_of(&cells[0])).to_string();
    let accepted = expected_statuses(&abbreviation);

    let href = find_tag(cells[1], &TagQuery::new("a"))
        .ok()
        .and_then(|a| a.value().attr("href"))
        .ok_or_else(|| row_error("no link in the second cell"))?;
    let link = base
        .join(href)
        .map_err(|e| row_error(&format!("bad link {href:?}: {e}")))?;

    Ok(ParsedRow {
        table_index,
        abbreviation,
        accepted,
        link: link.into(),
    })
}
