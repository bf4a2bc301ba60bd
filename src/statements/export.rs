// src/statements/export.rs
use crate::consolidate::row::{FACT_COLUMN, LABEL_COLUMN};
use crate::statements::models::{FilingType, Statement, StatementRequest};
use crate::utils::error::ExportError;
use chrono::Datelike;
use csv::Writer;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes statement tables as `Fact,Label,<columns...>` CSV files.
#[cfg_attr(not(test), allow(dead_code))]
pub struct CsvExporter {
    out_dir: PathBuf,
}

#[cfg_attr(not(test), allow(dead_code))]
impl CsvExporter {
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Result<Self, ExportError> {
        let out_dir = out_dir.as_ref().to_path_buf();
        if !out_dir.exists() {
            fs::create_dir_all(&out_dir)?;
        }
        Ok(Self { out_dir })
    }

    /// `{company}_{statement}_{year}.csv`, with `_Q{n}` appended for 10-Q filings
    pub fn file_name(request: &StatementRequest) -> String {
        let year = request.filing_date.year();
        let statement = request.kind.file_slug();
        match request.filing_type {
            FilingType::TenQ => format!(
                "{}_{}_{}_Q{}.csv",
                request.company_name,
                statement,
                year,
                request.quarter()
            ),
            FilingType::TenK => format!("{}_{}_{}.csv", request.company_name, statement, year),
        }
    }

    pub fn export(
        &self,
        request: &StatementRequest,
        statement: &Statement,
    ) -> Result<PathBuf, ExportError> {
        let path = self.out_dir.join(Self::file_name(request));
        let mut writer = Writer::from_path(&path)?;

        let mut header = vec![FACT_COLUMN, LABEL_COLUMN];
        header.extend(statement.columns.iter().map(String::as_str));
        writer.write_record(&header)?;

        for row in &statement.rows {
            if row.values.len() != statement.columns.len() {
                return Err(ExportError::RowWidth {
                    fact: row.fact.clone(),
                    expected: statement.columns.len(),
                    found: row.values.len(),
                });
            }
            let mut record = vec![row.fact.as_str(), row.label.as_str()];
            record.extend(row.values.iter().map(String::as_str));
            writer.write_record(&record)?;
        }
        writer.flush()?;

        tracing::info!("{} exported as {}", statement.kind, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::models::StatementKind;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn request(filing_type: FilingType, month: u32) -> StatementRequest {
        StatementRequest {
            ticker: "ACME".into(),
            company_name: "Acme".into(),
            filing_type,
            filing_date: NaiveDate::from_ymd_opt(2023, month, 15).unwrap(),
            accession_number: "0000000000-23-000001".into(),
            kind: StatementKind::IncomeStatement,
        }
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            CsvExporter::file_name(&request(FilingType::TenK, 2)),
            "Acme_income_statement_2023.csv"
        );
        assert_eq!(
            CsvExporter::file_name(&request(FilingType::TenQ, 8)),
            "Acme_income_statement_2023_Q3.csv"
        );
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();
        let mut statement = Statement::new(
            StatementKind::IncomeStatement,
            vec!["2023-12-31".into(), "2022-12-31".into()],
        );
        statement.push_row("Revenue", "Total revenue, net", &["100", "90"]);

        let path = exporter.export(&request(FilingType::TenK, 2), &statement).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert_eq!(
            content,
            "Fact,Label,2023-12-31,2022-12-31\nRevenue,\"Total revenue, net\",100,90\n"
        );
    }

    #[test]
    fn test_export_rejects_ragged_rows() {
        let dir = TempDir::new().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();
        let mut statement = Statement::new(StatementKind::BalanceSheet, vec!["2023-12-31".into()]);
        statement.push_row("Assets", "Assets", &["1", "2"]);

        let err = exporter.export(&request(FilingType::TenK, 2), &statement).unwrap_err();
        assert!(matches!(err, ExportError::RowWidth { expected: 1, found: 2, .. }));
    }
}
