// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Errors raised while merging, sorting and assembling statement CSVs
#[derive(Error, Debug)]
pub enum ConsolidateError {
    #[error("Input file not found: {}", .0.display())]
    MissingInputFile(PathBuf),

    #[error("Malformed CSV {}: {reason}", path.display())]
    MalformedCsv { path: PathBuf, reason: String },

    #[error("Invalid date column '{key}' on entry (Fact={fact:?}, Label={label:?})")]
    InvalidDateKey {
        fact: Option<String>,
        label: Option<String>,
        key: String,
    },

    #[error("Failed to write {}: {source}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Errors from the statement data source collaborator
#[derive(Error, Debug)]
#[cfg_attr(not(test), allow(dead_code))]
pub enum SourceError {
    #[error("Data source identity is not configured (set {0})")]
    MissingIdentity(&'static str),

    #[error("Statement unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
#[cfg_attr(not(test), allow(dead_code))]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Row {fact:?} has {found} values for {expected} columns")]
    RowWidth {
        fact: String,
        expected: usize,
        found: usize,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error(transparent)]
    Write(#[from] ConsolidateError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Consolidation failed: {0}")]
    Consolidate(#[from] ConsolidateError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
