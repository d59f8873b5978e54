//! The immutable, load-once dataset.
//!
//! A [`Dataset`] is built exactly once at startup from the parsed feed
//! and never mutated afterwards. It can therefore be shared read-only
//! across request handlers (via `Arc`) without any locking.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::CaseRecord;

/// Errors that can occur when constructing a dataset.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    /// The input contained no records. An empty dataset cannot serve any
    /// query, so construction fails instead of deferring the problem.
    #[error("Dataset cannot be empty")]
    Empty,

    /// A record carried a blank region identifier.
    #[error("Record at row {row} has a blank region")]
    BlankRegion {
        /// Zero-based index of the offending record in load order.
        row: usize,
    },
}

/// The full, immutable collection of case records loaded at startup.
///
/// Records keep their load order. A region index, built once during
/// construction, maps every region to the row indices that carry it, so
/// per-region queries avoid rescanning the whole collection.
///
/// Row-selection policy: when a region has multiple rows (multiple
/// reporting dates), single-row metrics use the FIRST row in load order.
/// This reproduces the upstream feed's effective behavior and is pinned
/// by tests in the aggregation layer.
#[derive(Debug)]
pub struct Dataset {
    records: Vec<CaseRecord>,
    /// Region -> row indices in load order. Insertion order of keys is
    /// tracked separately in `region_order`.
    region_index: HashMap<String, Vec<usize>>,
    /// Distinct regions in first-encountered order.
    region_order: Vec<String>,
}

impl Dataset {
    /// Builds a dataset from parsed records.
    ///
    /// # Errors
    ///
    /// Returns an error if `records` is empty or any record has a blank
    /// region identifier.
    pub fn from_records(records: Vec<CaseRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut region_index: HashMap<String, Vec<usize>> = HashMap::new();
        let mut region_order = Vec::new();

        for (row, record) in records.iter().enumerate() {
            if record.region.trim().is_empty() {
                return Err(DatasetError::BlankRegion { row });
            }
            let rows = region_index.entry(record.region.clone()).or_default();
            if rows.is_empty() {
                region_order.push(record.region.clone());
            }
            rows.push(row);
        }

        Ok(Self {
            records,
            region_index,
            region_order,
        })
    }

    /// Returns all records in load order.
    #[must_use]
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the dataset holds no records.
    ///
    /// Construction rejects empty input, so this is always false for a
    /// successfully built dataset; provided for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the distinct regions in first-encountered order.
    ///
    /// This ordering is deterministic for a fixed dataset and drives the
    /// dashboard's region selector options.
    #[must_use]
    pub fn regions(&self) -> Vec<&str> {
        self.region_order.iter().map(String::as_str).collect()
    }

    /// Returns true if the given region appears in the dataset.
    #[must_use]
    pub fn contains_region(&self, region: &str) -> bool {
        self.region_index.contains_key(region)
    }

    /// Returns all rows for a region, in load order.
    #[must_use]
    pub fn rows_for_region(&self, region: &str) -> Vec<&CaseRecord> {
        self.region_index
            .get(region)
            .map(|rows| rows.iter().map(|&row| &self.records[row]).collect())
            .unwrap_or_default()
    }

    /// Returns the row single-row metrics use for a region: the first
    /// matching row in load order. None if the region is absent.
    #[must_use]
    pub fn first_row_for_region(&self, region: &str) -> Option<&CaseRecord> {
        self.region_index
            .get(region)
            .and_then(|rows| rows.first())
            .map(|&row| &self.records[row])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<CaseRecord> {
        vec![
            CaseRecord::new("GA", 100, 5)
                .with_tests(1_000)
                .with_hospitalized(10, 50),
            CaseRecord::new("GA", 50, 2)
                .with_tests(500)
                .with_hospitalized(10, 50),
            CaseRecord::new("FL", 200, 20)
                .with_tests(2_000)
                .with_hospitalized(30, 90),
        ]
    }

    #[test]
    fn test_from_records_rejects_empty_input() {
        let err = Dataset::from_records(vec![]).unwrap_err();
        assert_eq!(err, DatasetError::Empty);
    }

    #[test]
    fn test_from_records_rejects_blank_region() {
        let records = vec![CaseRecord::new("GA", 100, 5), CaseRecord::new(" ", 1, 0)];
        let err = Dataset::from_records(records).unwrap_err();
        assert_eq!(err, DatasetError::BlankRegion { row: 1 });
    }

    #[test]
    fn test_records_keep_load_order() {
        let dataset = Dataset::from_records(sample_records()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records()[0].positive_cases, 100);
        assert_eq!(dataset.records()[2].region, "FL");
    }

    #[test]
    fn test_regions_in_first_encountered_order() {
        let dataset = Dataset::from_records(sample_records()).unwrap();
        assert_eq!(dataset.regions(), vec!["GA", "FL"]);
    }

    #[test]
    fn test_rows_for_region() {
        let dataset = Dataset::from_records(sample_records()).unwrap();
        let rows = dataset.rows_for_region("GA");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].positive_cases, 100);
        assert_eq!(rows[1].positive_cases, 50);

        assert!(dataset.rows_for_region("TX").is_empty());
    }

    #[test]
    fn test_first_row_for_region_uses_load_order() {
        let dataset = Dataset::from_records(sample_records()).unwrap();
        let row = dataset.first_row_for_region("GA").unwrap();
        assert_eq!(row.positive_cases, 100);

        assert!(dataset.first_row_for_region("TX").is_none());
    }

    #[test]
    fn test_contains_region() {
        let dataset = Dataset::from_records(sample_records()).unwrap();
        assert!(dataset.contains_region("FL"));
        assert!(!dataset.contains_region("fl"));
    }
}
