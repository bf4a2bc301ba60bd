// src/statements/mod.rs
// Upstream collaborators: the consolidation binary only consumes their CSV output
pub mod export;
pub mod models;
pub mod source;

use export::CsvExporter;
use models::StatementRequest;
use source::{SourceConfig, StatementSource};
use std::path::PathBuf;

/// Fetches and exports each requested statement, returning the CSV paths written.
///
/// A statement that cannot be fetched or written is logged and skipped so the
/// remaining statements still reach disk.
#[cfg_attr(not(test), allow(dead_code))]
pub fn export_statements<S: StatementSource>(
    source: &S,
    config: &SourceConfig,
    requests: &[StatementRequest],
    exporter: &CsvExporter,
) -> Vec<PathBuf> {
    let mut written = Vec::new();
    for request in requests {
        let statement = match source.fetch(config, request) {
            Ok(statement) => statement,
            Err(e) => {
                tracing::error!(
                    "Error occurred while processing {} for {} ({}): {}",
                    request.kind,
                    request.ticker,
                    request.accession_number,
                    e
                );
                continue;
            }
        };
        match exporter.export(request, &statement) {
            Ok(path) => written.push(path),
            Err(e) => tracing::error!("Failed to export {}: {}", request.kind, e),
        }
    }
    written
}
