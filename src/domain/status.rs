/// Label reported for abbreviations missing from [`EXPECTED_STATUS`].
pub const UNKNOWN_STATUS: &str = "Unknown status";

/// PEP index abbreviations and the detail-page statuses each one accepts.
pub const EXPECTED_STATUS: &[(&str, &[&str])] = &[
    ("A", &["Active", "Accepted"]),
    ("D", &["Deferred"]),
    ("F", &["Final"]),
    ("P", &["Provisional"]),
    ("R", &["Rejected"]),
    ("S", &["Superseded"]),
    ("W", &["Withdrawn"]),
    ("", &["Draft", "Active"]),
];

/// Accepted statuses for `key`, or the unknown-status sentinel.
pub fn expected_statuses(key: &str) -> &'static [&'static str] {
    EXPECTED_STATUS
        .iter()
        .find(|(abbr, _)| *abbr == key)
        .map(|(_, statuses)| *statuses)
        .unwrap_or(&[UNKNOWN_STATUS])
}

/// Lookup key for an index cell: its first character, or `""` when empty.
pub fn abbreviation_key(cell_text: &str) -> &str {
    let trimmed = cell_text.trim();
    match trimmed.char_indices().nth(1) {
        Some((end, _)) => &trimmed[..end],
        None => trimmed,
    }
}
