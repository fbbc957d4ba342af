use std::collections::HashSet;

use super::error::{DataError, Result};
use super::model::{ColumnSpec, Dataset, FilterOptions};

/// Collect, for every column in `schema`, the distinct values it takes
/// across the whole dataset, in the order they first appear.
///
/// Every schema column gets an entry, even when the dataset is empty. A
/// record lacking a schema column is reported as
/// [`DataError::MissingColumn`] rather than contributing a bogus value.
pub fn derive_options(dataset: &Dataset, schema: &[ColumnSpec]) -> Result<FilterOptions> {
    let mut options: FilterOptions = schema
        .iter()
        .map(|col| (col.name.to_string(), Default::default()))
        .collect();

    let mut seen: Vec<HashSet<&str>> = vec![HashSet::new(); schema.len()];

    for (row, record) in dataset.records().iter().enumerate() {
        for (col, col_seen) in schema.iter().zip(seen.iter_mut()) {
            let value = record.get(col.name).ok_or_else(|| DataError::MissingColumn {
                column: col.name.to_string(),
                row,
            })?;
            if col_seen.insert(value) {
                if let Some(values) = options.get_mut(col.name) {
                    values.push(value.to_string());
                }
            }
        }
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::loader::parse_csv;
    use crate::data::model::{Record, SCHEMA};

    fn set(values: &[String]) -> BTreeSet<&str> {
        values.iter().map(String::as_str).collect()
    }

    #[test]
    fn distinct_values_per_column() {
        let ds = parse_csv(
            "number,mod3,mod4,mod5,mod6\n1,1,1,1,1\n2,2,2,2,2\n3,0,3,3,3\n4,1,0,4,4\n",
        )
        .unwrap();
        let opts = derive_options(&ds, SCHEMA).unwrap();

        assert_eq!(opts.len(), SCHEMA.len());
        assert_eq!(opts["number"], ["1", "2", "3", "4"]);
        assert_eq!(opts["mod3"], ["1", "2", "0"]);
        assert_eq!(opts["mod4"], ["1", "2", "3", "0"]);
    }

    #[test]
    fn matches_brute_force_distinct_values() {
        let ds = parse_csv("number,mod3\n1,1\n2,2\n3,0\n4,1\n5,2\n6,0\n,\n").unwrap();
        let schema = &SCHEMA[..2];
        let opts = derive_options(&ds, schema).unwrap();
        for col in schema {
            let expected: BTreeSet<&str> = ds
                .records()
                .iter()
                .map(|r| r.get(col.name).unwrap())
                .collect();
            assert_eq!(set(&opts[col.name]), expected);
            assert_eq!(opts[col.name].len(), expected.len(), "no duplicates in {}", col.name);
        }
        assert!(opts["mod3"].iter().any(String::is_empty));
    }

    #[test]
    fn empty_dataset_maps_every_column_to_empty_set() {
        let opts = derive_options(&Dataset::default(), SCHEMA).unwrap();
        assert_eq!(opts.len(), SCHEMA.len());
        assert!(opts.values().all(Vec::is_empty));
    }

    #[test]
    fn values_keep_first_seen_order() {
        let ds = parse_csv("number,mod3\n1,1\n2,2\n10,1\n100,1\n3,0\n").unwrap();
        let opts = derive_options(&ds, &SCHEMA[..2]).unwrap();
        assert_eq!(opts["number"], ["1", "2", "10", "100", "3"]);
        assert_eq!(opts["mod3"], ["1", "2", "0"]);
    }

    #[test]
    fn missing_column_is_reported() {
        let ds = Dataset::from_records(vec![
            [("number", "1"), ("mod3", "1")].into_iter().collect::<Record>(),
            [("number", "2")].into_iter().collect::<Record>(),
        ]);
        let err = derive_options(&ds, &SCHEMA[..2]).unwrap_err();
        match err {
            DataError::MissingColumn { column, row } => {
                assert_eq!(column, "mod3");
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn schema_column_absent_from_header_is_reported() {
        let ds = parse_csv("number\n1\n").unwrap();
        assert!(matches!(
            derive_options(&ds, SCHEMA),
            Err(DataError::MissingColumn { row: 0, .. })
        ));
    }
}
