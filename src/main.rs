// src/main.rs
mod consolidate;
mod statements;
mod storage;
mod utils;

use clap::Parser;
use consolidate::{IncompleteRowPolicy, MergeOptions};
use std::path::PathBuf;
use storage::StorageManager;
use utils::AppError;

/// Combines exported financial statement CSVs into one JSON document per company
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Company name used in the report and its file name
    #[arg(short, long)]
    company: String,

    /// CSV files to combine, in priority order (default: every *.csv in --input-dir)
    files: Vec<PathBuf>,

    /// Directory scanned for CSV files when none are listed
    #[arg(short, long, default_value = ".")]
    input_dir: PathBuf,

    /// Output directory for the combined JSON
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Drop rows missing a Fact or Label instead of merging them together
    #[arg(long)]
    skip_incomplete_rows: bool,
}

impl Args {
    fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            incomplete_rows: if self.skip_incomplete_rows {
                IncompleteRowPolicy::Skip
            } else {
                IncompleteRowPolicy::Merge
            },
        }
    }
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting consolidation for args: {:?}", args);

    if args.company.trim().is_empty() {
        return Err(AppError::Config("Company name must not be empty".to_string()));
    }

    // 3. Collect the CSV files to combine
    let files = if args.files.is_empty() {
        storage::discover_csv_files(&args.input_dir)?
    } else {
        args.files.clone()
    };

    if files.is_empty() {
        tracing::info!("No exported CSV files found in {}", args.input_dir.display());
        return Ok(());
    }
    tracing::info!("Combining {} CSV files for {}", files.len(), args.company);

    // 4. Merge, order date columns and wrap
    let result = consolidate::consolidate(&args.company, &files, args.merge_options())?;

    // 5. Write the combined JSON
    let storage = StorageManager::new(&args.output_dir)?;
    let path = storage.save_report(&result.report)?;

    tracing::info!(
        "Combined JSON data exported as {} ({} facts, {} warnings)",
        path.display(),
        result.report.entries.len(),
        result.warnings.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_positional_files_and_flags() {
        let args = Args::try_parse_from([
            "sec-consolidator",
            "--company",
            "Acme",
            "--skip-incomplete-rows",
            "b.csv",
            "a.csv",
        ])
        .unwrap();

        assert_eq!(args.files, vec![PathBuf::from("b.csv"), PathBuf::from("a.csv")]);
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.merge_options().incomplete_rows, IncompleteRowPolicy::Skip);
    }

    #[test]
    fn test_args_require_company() {
        assert!(Args::try_parse_from(["sec-consolidator"]).is_err());
    }
}
