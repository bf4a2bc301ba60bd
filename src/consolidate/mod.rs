// src/consolidate/mod.rs
pub mod merger;
pub mod report;
pub mod row;
pub mod sorter;

pub use merger::{merge, IncompleteRowPolicy, MergeOptions, MergeWarning};
pub use report::ConsolidatedReport;

use crate::utils::error::ConsolidateError;
use std::path::Path;

/// Result of a full consolidation run.
#[derive(Debug)]
pub struct Consolidation {
    pub report: ConsolidatedReport,
    pub warnings: Vec<MergeWarning>,
}

/// Merges `files` in order, sorts each entry's date columns and wraps the
/// result for `company`.
///
/// Missing and malformed files come back as warnings. An invalid date column
/// aborts the run and nothing is returned.
pub fn consolidate<P: AsRef<Path>>(
    company: &str,
    files: &[P],
    options: MergeOptions,
) -> Result<Consolidation, ConsolidateError> {
    let outcome = merge(files, options);
    let entries = sorter::sort_keys(outcome.rows)?;

    Ok(Consolidation {
        report: ConsolidatedReport::new(company, entries),
        warnings: outcome.warnings,
    })
}
