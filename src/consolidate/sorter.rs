// src/consolidate/sorter.rs
use crate::consolidate::row::{ColumnMap, FactRow};
use crate::utils::error::ConsolidateError;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

const DATE_FORMAT: &str = "%Y-%m-%d";

// Prefix match; anything after the date is part of the key but not of the match
static DATE_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("Failed to compile DATE_KEY_RE")
});

pub fn is_date_key(key: &str) -> bool {
    DATE_KEY_RE.is_match(key)
}

/// Moves the date-shaped columns of `row` after all other columns, most recent first.
///
/// Non-date columns keep their relative order and values. A key that looks like
/// a date but is not a real calendar date fails the whole row.
pub fn sort_row_keys(row: &mut FactRow) -> Result<(), ConsolidateError> {
    let mut plain = Vec::new();
    let mut dated = Vec::new();

    // The row is only replaced once every date key has parsed
    for (key, value) in row.values.iter() {
        if !is_date_key(key) {
            plain.push((key.to_string(), value.to_string()));
            continue;
        }
        match NaiveDate::parse_from_str(key, DATE_FORMAT) {
            Ok(date) => dated.push((date, key.to_string(), value.to_string())),
            Err(e) => {
                tracing::error!("Column '{}' is not a valid date: {}", key, e);
                return Err(ConsolidateError::InvalidDateKey {
                    fact: row.fact.clone(),
                    label: row.label.clone(),
                    key: key.to_string(),
                });
            }
        }
    }

    // Stable, so equal dates keep their encounter order
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    row.values = plain
        .into_iter()
        .chain(dated.into_iter().map(|(_, key, value)| (key, value)))
        .collect::<ColumnMap>();
    Ok(())
}

/// Applies [`sort_row_keys`] to every entry, stopping at the first invalid date.
pub fn sort_keys(mut entries: Vec<FactRow>) -> Result<Vec<FactRow>, ConsolidateError> {
    for entry in entries.iter_mut() {
        sort_row_keys(entry)?;
    }
    Ok(entries)
}
