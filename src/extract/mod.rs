//! Pure extraction over parsed HTML.
//!
//! Nothing here logs; callers in [`crate::modes`] decide whether a failure
//! skips an item or aborts the page.

pub mod rows;
pub mod status;
pub mod tags;

pub use rows::{extract_rows, parse_row, ParsedRow, RowExtraction};
pub use status::{extract_status, status_from_document};
pub use tags::{find_all, find_tag, text_of, TagQuery};
