pub mod status;
pub mod table;
pub mod tally;

pub use status::{abbreviation_key, expected_statuses, EXPECTED_STATUS, UNKNOWN_STATUS};
pub use table::ResultTable;
pub use tally::{StatusTally, TOTAL_LABEL};
