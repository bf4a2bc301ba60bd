// src/consolidate/row.rs
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const FACT_COLUMN: &str = "Fact";
pub const LABEL_COLUMN: &str = "Label";

/// Identity of a row across all input files. Missing cells are `None`.
pub type RowKey = (Option<String>, Option<String>);

/// Column key to value mapping that keeps insertion order.
///
/// Statement tables only carry a handful of columns, so lookups scan the
/// backing vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    entries: Vec<(String, String)>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Sets `key` to `value`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Appends `key` only when it is not present yet. Returns whether it was added.
    pub fn insert_if_absent(&mut self, key: &str, value: &str) -> bool {
        if self.contains_key(key) {
            return false;
        }
        self.entries.push((key.to_string(), value.to_string()));
        true
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for ColumnMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = ColumnMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// One consolidated financial fact with its per-column values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRow {
    pub fact: Option<String>,
    pub label: Option<String>,
    pub values: ColumnMap,
}

impl FactRow {
    pub fn new(fact: Option<String>, label: Option<String>) -> Self {
        Self {
            fact,
            label,
            values: ColumnMap::new(),
        }
    }
}

// Flattened as {"Fact": .., "Label": .., <values in order>}
impl Serialize for FactRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 2))?;
        map.serialize_entry(FACT_COLUMN, &self.fact)?;
        map.serialize_entry(LABEL_COLUMN, &self.label)?;
        for (key, value) in self.values.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FactRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FactRowVisitor;

        impl<'de> Visitor<'de> for FactRowVisitor {
            type Value = FactRow;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map with Fact, Label and string-valued columns")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FactRow, A::Error> {
                let mut row = FactRow::new(None, None);
                let mut seen_fact = false;
                let mut seen_label = false;

                while let Some(key) = access.next_key::<String>()? {
                    match key.as_str() {
                        FACT_COLUMN => {
                            if seen_fact {
                                return Err(de::Error::duplicate_field(FACT_COLUMN));
                            }
                            seen_fact = true;
                            row.fact = access.next_value()?;
                        }
                        LABEL_COLUMN => {
                            if seen_label {
                                return Err(de::Error::duplicate_field(LABEL_COLUMN));
                            }
                            seen_label = true;
                            row.label = access.next_value()?;
                        }
                        _ => {
                            let value: String = access.next_value()?;
                            row.values.insert(key, value);
                        }
                    }
                }

                Ok(row)
            }
        }

        deserializer.deserialize_map(FactRowVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut map = ColumnMap::new();
        map.insert("2023-01-01", "100");
        map.insert("Unit", "USD");
        map.insert("2023-01-01", "105");

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["2023-01-01", "Unit"]);
        assert_eq!(map.get("2023-01-01"), Some("105"));
    }

    #[test]
    fn test_insert_if_absent_never_overwrites() {
        let mut map = ColumnMap::new();
        assert!(map.insert_if_absent("2023-01-01", "100"));
        assert!(!map.insert_if_absent("2023-01-01", "999"));
        assert_eq!(map.get("2023-01-01"), Some("100"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_fact_row_serializes_flat_in_order() {
        let mut row = FactRow::new(Some("Revenue".into()), Some("Total Revenue".into()));
        row.values.insert("Unit", "USD");
        row.values.insert("2023-01-01", "100");

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            r#"{"Fact":"Revenue","Label":"Total Revenue","Unit":"USD","2023-01-01":"100"}"#
        );
    }

    #[test]
    fn test_missing_identity_serializes_as_null() {
        let row = FactRow::new(Some("Revenue".into()), None);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"Fact":"Revenue","Label":null}"#);
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let json = r#"{"Fact":"Assets","Label":"Assets","2021-12-31":"5","Unit":"USD","2022-12-31":"7"}"#;
        let row: FactRow = serde_json::from_str(json).unwrap();

        assert_eq!(row.fact.as_deref(), Some("Assets"));
        let keys: Vec<&str> = row.values.keys().collect();
        assert_eq!(keys, vec!["2021-12-31", "Unit", "2022-12-31"]);
    }

    #[test]
    fn test_deserialize_rejects_non_string_values() {
        let json = r#"{"Fact":"Assets","Label":"Assets","2021-12-31":5}"#;
        assert!(serde_json::from_str::<FactRow>(json).is_err());
    }
}
