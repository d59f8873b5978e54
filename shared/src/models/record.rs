//! Case record data model.
//!
//! Defines the core `CaseRecord` structure: one row of the upstream
//! COVID-19 statistics feed, already mapped to internal field names.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Errors that can occur when validating a case record.
#[derive(Debug, Error)]
pub enum RecordValidationError {
    /// The region identifier is empty.
    #[error("Record region cannot be empty")]
    EmptyRegion,

    /// Validation failed with details.
    #[error("Validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

/// One row of the source dataset.
///
/// A record carries the cumulative counters reported for a single region
/// on a single (optional) date. All counters are non-negative by
/// construction; the upstream feed leaves unknown values blank, which the
/// source loader maps to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CaseRecord {
    /// Region identifier (e.g. a state code such as "GA"). Never empty.
    #[validate(length(min = 1))]
    pub region: String,

    /// Reporting date of the row, when the feed provides one. Carried for
    /// display only; row selection never depends on it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Cumulative positive cases.
    pub positive_cases: u64,

    /// Cumulative deaths.
    pub deaths: u64,

    /// Cumulative test results.
    pub total_test_results: u64,

    /// Patients currently hospitalized.
    pub hospitalized_currently: u64,

    /// Cumulative hospitalizations.
    pub hospitalized_cumulative: u64,
}

impl CaseRecord {
    /// Creates a new case record with the given region and core counters.
    ///
    /// # Arguments
    ///
    /// * `region` - The region identifier
    /// * `positive_cases` - Cumulative positive cases
    /// * `deaths` - Cumulative deaths
    #[must_use]
    pub fn new(region: impl Into<String>, positive_cases: u64, deaths: u64) -> Self {
        Self {
            region: region.into(),
            date: None,
            positive_cases,
            deaths,
            total_test_results: 0,
            hospitalized_currently: 0,
            hospitalized_cumulative: 0,
        }
    }

    /// Sets the cumulative test results.
    #[must_use]
    pub fn with_tests(mut self, total_test_results: u64) -> Self {
        self.total_test_results = total_test_results;
        self
    }

    /// Sets the hospitalization counters.
    #[must_use]
    pub fn with_hospitalized(mut self, currently: u64, cumulative: u64) -> Self {
        self.hospitalized_currently = currently;
        self.hospitalized_cumulative = cumulative;
        self
    }

    /// Sets the reporting date.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Validates the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the region identifier is empty or contains only
    /// whitespace.
    pub fn validate_record(&self) -> Result<(), RecordValidationError> {
        if self.region.trim().is_empty() {
            return Err(RecordValidationError::EmptyRegion);
        }

        self.validate()?;
        Ok(())
    }
}
