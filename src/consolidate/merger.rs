// src/consolidate/merger.rs
use crate::consolidate::row::{ColumnMap, FactRow, RowKey, FACT_COLUMN, LABEL_COLUMN};
use crate::utils::error::ConsolidateError;
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What to do with rows that lack a `Fact` or `Label` cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IncompleteRowPolicy {
    /// Keep them; they all share the `(None, None)`-style degenerate identity.
    #[default]
    Merge,
    /// Drop them and report a warning per row.
    Skip,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    pub incomplete_rows: IncompleteRowPolicy,
}

/// Recoverable problems hit during a merge run.
#[derive(Error, Debug)]
pub enum MergeWarning {
    #[error("Skipped {0}")]
    SkippedFile(ConsolidateError),

    #[error("Skipped row {line} of {}: missing Fact or Label", path.display())]
    IncompleteRow { path: PathBuf, line: u64 },
}

#[derive(Debug, Default)]
pub struct MergeOutcome {
    pub rows: Vec<FactRow>,
    pub warnings: Vec<MergeWarning>,
    pub files_read: usize,
}

// One parsed data row before it is folded into the collection
struct ParsedRow {
    line: u64,
    fact: Option<String>,
    label: Option<String>,
    columns: ColumnMap,
}

/// Folds rows from many statement CSVs into one deduplicated collection.
///
/// Rows are identified by their `(Fact, Label)` pair. The first time a pair is
/// seen it is appended; later sightings only contribute columns the entry does
/// not have yet.
pub struct RowMerger {
    options: MergeOptions,
    rows: Vec<FactRow>,
    index: HashMap<RowKey, usize>,
    warnings: Vec<MergeWarning>,
    files_read: usize,
}

impl RowMerger {
    pub fn new(options: MergeOptions) -> Self {
        Self {
            options,
            rows: Vec::new(),
            index: HashMap::new(),
            warnings: Vec::new(),
            files_read: 0,
        }
    }

    /// Reads one file and merges its rows. Missing or unparseable files are
    /// recorded as warnings and leave the collection untouched.
    pub fn merge_file(&mut self, path: &Path) {
        if !path.exists() {
            tracing::warn!("File not found: {}", path.display());
            self.warnings.push(MergeWarning::SkippedFile(
                ConsolidateError::MissingInputFile(path.to_path_buf()),
            ));
            return;
        }

        // Parse the whole file first so a bad record halfway through skips it cleanly
        let parsed = match read_rows(path) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("{}", e);
                self.warnings.push(MergeWarning::SkippedFile(e));
                return;
            }
        };

        tracing::debug!("Read {} rows from {}", parsed.len(), path.display());
        self.files_read += 1;

        for row in parsed {
            if self.options.incomplete_rows == IncompleteRowPolicy::Skip
                && (row.fact.is_none() || row.label.is_none())
            {
                tracing::warn!(
                    "Skipping row {} of {}: missing Fact or Label",
                    row.line,
                    path.display()
                );
                self.warnings.push(MergeWarning::IncompleteRow {
                    path: path.to_path_buf(),
                    line: row.line,
                });
                continue;
            }
            self.merge_row(row);
        }
    }

    fn merge_row(&mut self, row: ParsedRow) {
        let key: RowKey = (row.fact, row.label);

        if let Some(&pos) = self.index.get(&key) {
            let existing = &mut self.rows[pos];
            for (column, value) in row.columns.iter() {
                existing.values.insert_if_absent(column, value);
            }
            return;
        }

        let entry = FactRow {
            fact: key.0.clone(),
            label: key.1.clone(),
            values: row.columns,
        };
        self.index.insert(key, self.rows.len());
        self.rows.push(entry);
    }

    pub fn finish(self) -> MergeOutcome {
        MergeOutcome {
            rows: self.rows,
            warnings: self.warnings,
            files_read: self.files_read,
        }
    }
}

/// Merges `files` in the given order.
pub fn merge<P: AsRef<Path>>(files: &[P], options: MergeOptions) -> MergeOutcome {
    let mut merger = RowMerger::new(options);
    for file in files {
        merger.merge_file(file.as_ref());
    }
    let outcome = merger.finish();
    tracing::info!(
        "Merged {} distinct facts from {} of {} files",
        outcome.rows.len(),
        outcome.files_read,
        files.len()
    );
    outcome
}

fn malformed(path: &Path, reason: impl ToString) -> ConsolidateError {
    ConsolidateError::MalformedCsv {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn read_rows(path: &Path) -> Result<Vec<ParsedRow>, ConsolidateError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| malformed(path, e))?;

    let headers: StringRecord = reader.headers().map_err(|e| malformed(path, e))?.clone();
    // A repeated Fact/Label header resolves to its last column, like a dict reader
    let fact_idx = headers.iter().collect::<Vec<_>>().iter().rposition(|h| *h == FACT_COLUMN);
    let label_idx = headers.iter().collect::<Vec<_>>().iter().rposition(|h| *h == LABEL_COLUMN);
    let (fact_idx, label_idx) = match (fact_idx, label_idx) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(malformed(path, "header row must contain Fact and Label columns")),
    };

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| malformed(path, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        // Short rows leave trailing cells absent; surplus cells have no header and are dropped
        let mut columns = ColumnMap::new();
        for (idx, header) in headers.iter().enumerate() {
            if header == FACT_COLUMN || header == LABEL_COLUMN {
                continue;
            }
            if let Some(value) = record.get(idx) {
                columns.insert(header, value);
            }
        }

        rows.push(ParsedRow {
            line,
            fact: record.get(fact_idx).map(str::to_string),
            label: record.get(label_idx).map(str::to_string),
            columns,
        });
    }

    Ok(rows)
}
