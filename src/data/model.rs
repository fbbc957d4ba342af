use std::collections::BTreeMap;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// ColumnSpec – one entry of the static table schema
// ---------------------------------------------------------------------------

/// A column the table knows about: the key used in each [`Record`] and the
/// label shown in the table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub label: &'static str,
}

impl ColumnSpec {
    pub const fn new(name: &'static str, label: &'static str) -> Self {
        Self { name, label }
    }
}

/// The schema of the bundled dataset. Defined statically, never derived
/// from the loaded data.
pub const SCHEMA: &[ColumnSpec] = &[
    ColumnSpec::new("number", "Number"),
    ColumnSpec::new("mod3", "Modulo 3"),
    ColumnSpec::new("mod4", "Modulo 4"),
    ColumnSpec::new("mod5", "Modulo 5"),
    ColumnSpec::new("mod6", "Modulo 6"),
];

// ---------------------------------------------------------------------------
// Record – one row of the CSV
// ---------------------------------------------------------------------------

/// A single row: column name → cell text.
///
/// Deserialized directly from a header-keyed CSV row, so every record of a
/// dataset carries exactly the columns named in the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Cell value of `column`, if the record has that column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Whether the record holds exactly `value` in `column`.
    /// A record without the column never matches, not even the empty string.
    pub fn matches(&self, column: &str, value: &str) -> bool {
        self.get(column) == Some(value)
    }

    #[cfg(test)]
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded CSV
// ---------------------------------------------------------------------------

/// All records in source order. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Column names as they appear in the header row.
    pub headers: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Dataset { headers, records }
    }

    /// Build a dataset from records alone, taking the header from the first
    /// record's columns.
    #[cfg(test)]
    pub fn from_records(records: Vec<Record>) -> Self {
        let headers = records
            .first()
            .map(|r| r.columns().map(str::to_string).collect())
            .unwrap_or_default();
        Dataset { headers, records }
    }

    /// Whether the header row names `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FilterOptions – selectable values per column
// ---------------------------------------------------------------------------

/// For each schema column the distinct values in the full dataset, in the
/// order they first appear.
pub type FilterOptions = BTreeMap<String, Vec<String>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_matches_exact_value_only() {
        let rec: Record = [("number", "1"), ("mod3", "")].into_iter().collect();
        assert!(rec.matches("number", "1"));
        assert!(!rec.matches("number", "01"));
        assert!(rec.matches("mod3", ""));
        assert!(!rec.matches("mod4", ""));
    }

    #[test]
    fn dataset_from_records_takes_headers_from_first_record() {
        let ds = Dataset::from_records(vec![
            [("b", "1"), ("a", "2")].into_iter().collect(),
        ]);
        assert_eq!(ds.headers, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(ds.len(), 1);
        assert!(Dataset::from_records(Vec::new()).headers.is_empty());
    }

    #[test]
    fn has_column_checks_header_names() {
        let ds = Dataset::new(
            vec!["number".into(), "mod3".into()],
            vec![[("number", "1"), ("mod3", "1")].into_iter().collect()],
        );
        assert!(ds.has_column("mod3"));
        assert!(!ds.has_column("Modulo 3"));
        assert!(SCHEMA.iter().any(|c| c.name == "mod5"));
    }
}
