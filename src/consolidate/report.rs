// src/consolidate/report.rs
use crate::consolidate::row::FactRow;
use crate::utils::error::ConsolidateError;
use serde::{Deserialize, Serialize};

pub const ARTIFACT_SUFFIX: &str = "_combined_financial_data";

// Borrowed view of the envelope so assembling never copies the entries
#[derive(Serialize)]
struct Envelope<'a> {
    #[serde(rename = "Company")]
    company: &'a str,
    #[serde(rename = "Data")]
    entries: &'a [FactRow],
}

/// The merged facts for one company, as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedReport {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Data")]
    pub entries: Vec<FactRow>,
}

impl ConsolidatedReport {
    pub fn new(company: impl Into<String>, entries: Vec<FactRow>) -> Self {
        Self {
            company: company.into(),
            entries,
        }
    }

    /// Serializes through [`assemble`].
    pub fn to_json(&self) -> Result<String, ConsolidateError> {
        assemble(&self.company, &self.entries)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn from_json(json: &str) -> Result<Self, ConsolidateError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Base name (without extension) of the artifact for this company.
    pub fn artifact_stem(&self) -> String {
        artifact_stem(&self.company)
    }
}

pub fn artifact_stem(company: &str) -> String {
    let safe: String = company
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{}{}", safe, ARTIFACT_SUFFIX)
}

/// Wraps sorted entries in the company envelope and serializes them as
/// pretty-printed JSON with two-space indentation.
pub fn assemble(company: &str, entries: &[FactRow]) -> Result<String, ConsolidateError> {
    Ok(serde_json::to_string_pretty(&Envelope { company, entries })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revenue_row() -> FactRow {
        let mut row = FactRow::new(Some("Revenue".into()), Some("Revenue".into()));
        row.values.insert("2023-01-01", "100");
        row.values.insert("2022-01-01", "90");
        row
    }

    #[test]
    fn test_envelope_shape() {
        let json = assemble("Acme", &[revenue_row()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(value["Company"], "Acme");
        assert_eq!(value["Data"][0]["Fact"], "Revenue");
        assert_eq!(value["Data"][0]["2022-01-01"], "90");
    }

    #[test]
    fn test_pretty_output_is_stable() {
        let json = assemble("Acme", &[revenue_row()]).unwrap();
        let expected = "{\n  \"Company\": \"Acme\",\n  \"Data\": [\n    {\n      \"Fact\": \"Revenue\",\n      \"Label\": \"Revenue\",\n      \"2023-01-01\": \"100\",\n      \"2022-01-01\": \"90\"\n    }\n  ]\n}";
        assert_eq!(json, expected);
        assert_eq!(assemble("Acme", &[revenue_row()]).unwrap(), json);
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let mut other = FactRow::new(Some("Assets".into()), None);
        other.values.insert("Unit", "USD");
        other.values.insert("2021-12-31", "5");
        let report = ConsolidatedReport::new("Acme", vec![revenue_row(), other]);

        let parsed = ConsolidatedReport::from_json(&report.to_json().unwrap()).unwrap();

        assert_eq!(parsed, report);
        let keys: Vec<&str> = parsed.entries[1].values.keys().collect();
        assert_eq!(keys, vec!["Unit", "2021-12-31"]);
    }

    #[test]
    fn test_to_json_matches_assemble() {
        let report = ConsolidatedReport::new("Acme", vec![revenue_row()]);
        assert_eq!(report.to_json().unwrap(), assemble("Acme", &report.entries).unwrap());
        assert_eq!(
            report.to_json().unwrap(),
            serde_json::to_string_pretty(&report).unwrap()
        );
    }

    #[test]
    fn test_empty_data() {
        let json = assemble("Acme", &[]).unwrap();
        let parsed = ConsolidatedReport::from_json(&json).unwrap();
        assert!(parsed.entries.is_empty());
    }

    #[test]
    fn test_artifact_stem() {
        assert_eq!(artifact_stem("Acme Corp"), "Acme Corp_combined_financial_data");
        assert_eq!(artifact_stem("A/B"), "A_B_combined_financial_data");
    }
}
