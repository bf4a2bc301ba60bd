// src/statements/models.rs
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Financial statement types available from a filing's XBRL data
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    IncomeStatement,
    BalanceSheet,
    CashFlowStatement,
}

#[cfg_attr(not(test), allow(dead_code))]
impl StatementKind {
    /// Every statement type, in menu order ("All Statements")
    pub fn all() -> [StatementKind; 3] {
        [
            StatementKind::IncomeStatement,
            StatementKind::BalanceSheet,
            StatementKind::CashFlowStatement,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StatementKind::IncomeStatement => "Income Statement",
            StatementKind::BalanceSheet => "Balance Sheet",
            StatementKind::CashFlowStatement => "Cash Flow Statement",
        }
    }

    /// e.g. "cash_flow_statement"
    pub fn file_slug(&self) -> String {
        self.display_name().to_lowercase().replace(' ', "_")
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilingType {
    #[serde(rename = "10-K")]
    TenK,
    #[serde(rename = "10-Q")]
    TenQ,
}

#[cfg_attr(not(test), allow(dead_code))]
impl FilingType {
    pub fn form(&self) -> &'static str {
        match self {
            FilingType::TenK => "10-K",
            FilingType::TenQ => "10-Q",
        }
    }
}

/// Identifies one statement of one filing
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRequest {
    pub ticker: String,
    pub company_name: String,
    pub filing_type: FilingType,
    pub filing_date: NaiveDate,
    pub accession_number: String,
    pub kind: StatementKind,
}

#[cfg_attr(not(test), allow(dead_code))]
impl StatementRequest {
    /// Calendar quarter (1-4) of the filing date
    pub fn quarter(&self) -> u32 {
        (self.filing_date.month() - 1) / 3 + 1
    }
}

/// One line of a statement table
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRow {
    pub fact: String,
    pub label: String,
    pub values: Vec<String>, // aligned with Statement::columns
}

/// A financial statement table: one row per fact, one value column per
/// reporting date (or metadata column such as "Unit").
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone)]
pub struct Statement {
    pub kind: StatementKind,
    pub columns: Vec<String>,
    pub rows: Vec<StatementRow>,
}

#[cfg_attr(not(test), allow(dead_code))]
impl Statement {
    pub fn new(kind: StatementKind, columns: Vec<String>) -> Self {
        Self {
            kind,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, fact: &str, label: &str, values: &[&str]) {
        self.rows.push(StatementRow {
            fact: fact.to_string(),
            label: label.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_slug() {
        assert_eq!(StatementKind::IncomeStatement.file_slug(), "income_statement");
        assert_eq!(StatementKind::CashFlowStatement.file_slug(), "cash_flow_statement");
    }

    #[test]
    fn test_all_statements_in_menu_order() {
        let names: Vec<String> = StatementKind::all().iter().map(|k| k.to_string()).collect();
        assert_eq!(names, vec!["Income Statement", "Balance Sheet", "Cash Flow Statement"]);
    }

    #[test]
    fn test_quarter_from_filing_date() {
        let mut request = StatementRequest {
            ticker: "ACME".into(),
            company_name: "Acme".into(),
            filing_type: FilingType::TenQ,
            filing_date: NaiveDate::from_ymd_opt(2023, 5, 2).unwrap(),
            accession_number: "0000000000-23-000001".into(),
            kind: StatementKind::BalanceSheet,
        };
        assert_eq!(request.quarter(), 2);

        request.filing_date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(request.quarter(), 4);
        request.filing_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert_eq!(request.quarter(), 1);
    }

    #[test]
    fn test_filing_type_serde_uses_form_names() {
        let json = serde_json::to_string(&FilingType::TenK).unwrap();
        assert_eq!(json, "\"10-K\"");
        assert_eq!(FilingType::TenQ.form(), "10-Q");
    }
}
