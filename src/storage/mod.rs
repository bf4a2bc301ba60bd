// src/storage/mod.rs
use crate::consolidate::ConsolidatedReport;
use crate::utils::error::{ConsolidateError, StorageError};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn report_path(&self, report: &ConsolidatedReport) -> PathBuf {
        self.base_dir.join(format!("{}.json", report.artifact_stem()))
    }

    /// Writes the report as `{company}_combined_financial_data.json`.
    ///
    /// The JSON is staged in a sibling `.tmp` file and renamed into place, so the
    /// final name only ever holds a complete document.
    pub fn save_report(&self, report: &ConsolidatedReport) -> Result<PathBuf, StorageError> {
        let json = report
            .to_json()
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        let file_path = self.report_path(report);
        let tmp_path = file_path.with_extension("json.tmp");

        if let Err(source) = write_synced(&tmp_path, json.as_bytes())
            .and_then(|_| fs::rename(&tmp_path, &file_path))
        {
            if let Err(e) = fs::remove_file(&tmp_path) {
                tracing::debug!("Could not remove {}: {}", tmp_path.display(), e);
            }
            tracing::error!("Failed to write {}: {}", file_path.display(), source);
            return Err(ConsolidateError::OutputWriteFailure {
                path: file_path,
                source,
            }
            .into());
        }

        tracing::info!("Saved combined report to {}", file_path.display());

        Ok(file_path)
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}

/// Lists the `.csv` files directly inside `dir`, sorted by file name.
pub fn discover_csv_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, StorageError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    tracing::debug!("Discovered {} CSV files in {}", files.len(), dir.as_ref().display());
    Ok(files)
}
