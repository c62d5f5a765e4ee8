use std::collections::HashMap;

use crate::domain::ResultTable;

pub const TOTAL_LABEL: &str = "Total";

/// Per-status counts in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct StatusTally {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
    total: usize,
}

impl StatusTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, status: &str) {
        match self.index.get(status) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(status.to_string(), self.entries.len());
                self.entries.push((status.to_string(), 1));
            }
        }
        self.total += 1;
    }

    pub fn count(&self, status: &str) -> usize {
        self.index.get(status).map_or(0, |&i| self.entries[i].1)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// `(Status, Count)` table with a trailing `Total` row.
    pub fn into_table(self) -> ResultTable {
        let mut table = ResultTable::new(["Status", "Count"]);
        for (status, count) in self.entries {
            table.push([status, count.to_string()]);
        }
        table.push([TOTAL_LABEL.to_string(), self.total.to_string()]);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_seen_order() {
        let mut tally = StatusTally::new();
        for status in ["Final", "Active", "Final", "Draft", "Active", "Final"] {
            tally.record(status);
        }

        let labels: Vec<_> = tally.entries().iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(labels, ["Final", "Active", "Draft"]);
        assert_eq!(tally.count("Final"), 3);
        assert_eq!(tally.count("Rejected"), 0);
        assert_eq!(tally.total(), 6);
    }

    #[test]
    fn test_table_ends_with_total() {
        let mut tally = StatusTally::new();
        tally.record("Accepted");

        let table = tally.into_table();
        assert_eq!(table.header(), ["Status", "Count"]);
        assert_eq!(table.rows(), [vec!["Accepted", "1"], vec!["Total", "1"]]);
    }

    #[test]
    fn test_empty_tally_has_zero_total() {
        let table = StatusTally::new().into_table();
        assert_eq!(table.rows(), [vec!["Total", "0"]]);
    }
}
