//! Per-region metric derivation over a [`Dataset`].
//!
//! [`MetricsAggregator`] is the query layer behind the dashboard's four
//! charts. Every operation is a pure query over the immutable dataset:
//! results are computed fresh on each call, there is no cache and no
//! mutable state, so the aggregator can be shared freely across request
//! handlers.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::Dataset;
use crate::models::CaseRecord;

/// Errors that can occur while deriving a per-region metric.
///
/// These are recoverable, per-query failures; they are returned to the
/// caller (the rendering layer) rather than aborting anything.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricsError {
    /// The queried region does not appear in the dataset.
    #[error("Region '{0}' not found in dataset")]
    RegionNotFound(String),

    /// The selected row reports zero positive cases, so a death rate
    /// cannot be computed.
    #[error("Region '{0}' has zero positive cases; death rate is undefined")]
    ZeroPositiveCases(String),
}

/// Summed positive cases for one region (bar chart row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCases {
    /// Region identifier.
    pub region: String,
    /// Sum of positive cases over every row for this region.
    pub positive_cases: u64,
}

/// One raw scatter-plot point: deaths against tests for a single row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathsVsTestsPoint {
    /// Region identifier (colors the point).
    pub region: String,
    /// Cumulative test results for the row.
    pub total_test_results: u64,
    /// Cumulative deaths for the row.
    pub deaths: u64,
}

/// Hospitalization figures for one region (grouped bar chart).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalizationSnapshot {
    /// Region identifier.
    pub region: String,
    /// Patients currently hospitalized.
    pub currently: u64,
    /// Cumulative hospitalizations.
    pub cumulative: u64,
}

/// Combined read-only view of one region's metrics.
///
/// `total_cases` sums every row for the region; the remaining fields are
/// drawn from the first row in load order (the single-row policy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionMetrics {
    /// Region identifier.
    pub region: String,
    /// Sum of positive cases over every row for this region.
    pub total_cases: u64,
    /// Death-rate percentage, or None when the selected row reports zero
    /// positive cases (the rate is undefined, not zero).
    pub death_rate: Option<f64>,
    /// Patients currently hospitalized.
    pub hospitalized_currently: u64,
    /// Cumulative hospitalizations.
    pub hospitalized_cumulative: u64,
}

/// The query layer deriving the dashboard's metrics from the dataset.
///
/// Holds a shared handle to the load-once dataset; all operations borrow
/// it read-only.
#[derive(Debug, Clone)]
pub struct MetricsAggregator {
    dataset: Arc<Dataset>,
}

impl MetricsAggregator {
    /// Creates an aggregator over the given dataset.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// Returns the underlying dataset.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Groups all records by region and sums positive cases per group.
    ///
    /// Output order is the first-encountered region order, which is
    /// deterministic for a fixed dataset and matches the region selector.
    /// The totals across all output rows always equal the dataset-wide
    /// positive-case sum.
    #[must_use]
    pub fn total_cases_by_region(&self) -> Vec<RegionCases> {
        let mut totals: HashMap<&str, u64> = HashMap::new();
        for record in self.dataset.records() {
            *totals.entry(record.region.as_str()).or_insert(0) += record.positive_cases;
        }

        self.dataset
            .regions()
            .into_iter()
            .map(|region| RegionCases {
                region: region.to_string(),
                positive_cases: totals.get(region).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Projects one `(region, tests, deaths)` point per record, in load
    /// order.
    ///
    /// This is a raw projection, not a rollup: the scatter plot draws
    /// every row as its own point, so the output length always equals the
    /// dataset length.
    #[must_use]
    pub fn deaths_vs_tests_series(&self) -> Vec<DeathsVsTestsPoint> {
        self.dataset
            .records()
            .iter()
            .map(|record| DeathsVsTestsPoint {
                region: record.region.clone(),
                total_test_results: record.total_test_results,
                deaths: record.deaths,
            })
            .collect()
    }

    /// Returns the hospitalization figures for a region.
    ///
    /// Uses the first row in load order when the region has multiple rows.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::RegionNotFound`] if the region does not
    /// appear in the dataset.
    pub fn hospitalization_snapshot(
        &self,
        region: &str,
    ) -> Result<HospitalizationSnapshot, MetricsError> {
        let row = self.select_row(region)?;
        Ok(HospitalizationSnapshot {
            region: row.region.clone(),
            currently: row.hospitalized_currently,
            cumulative: row.hospitalized_cumulative,
        })
    }

    /// Computes the death-rate percentage `100 * deaths / positive_cases`
    /// for a region.
    ///
    /// Uses the first row in load order when the region has multiple
    /// rows. The raw ratio is preserved: inconsistent data can yield a
    /// value above 100, and it is not clamped.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::RegionNotFound`] if the region does not
    /// appear in the dataset, or [`MetricsError::ZeroPositiveCases`] if
    /// the selected row reports zero positive cases.
    pub fn death_rate(&self, region: &str) -> Result<f64, MetricsError> {
        let row = self.select_row(region)?;
        if row.positive_cases == 0 {
            return Err(MetricsError::ZeroPositiveCases(region.to_string()));
        }
        // Counters fit comfortably in f64 mantissa range for this feed.
        #[allow(clippy::cast_precision_loss)]
        let rate = 100.0 * row.deaths as f64 / row.positive_cases as f64;
        Ok(rate)
    }

    /// Returns the combined per-region view backing the dashboard's
    /// region tab.
    ///
    /// An undefined death rate (zero positive cases on the selected row)
    /// is rendered as `None` here so the caller can show an empty gauge
    /// instead of an error state.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::RegionNotFound`] if the region does not
    /// appear in the dataset.
    pub fn region_metrics(&self, region: &str) -> Result<RegionMetrics, MetricsError> {
        let row = self.select_row(region)?;
        let total_cases = self
            .dataset
            .rows_for_region(region)
            .iter()
            .map(|r| r.positive_cases)
            .sum();

        let death_rate = match self.death_rate(region) {
            Ok(rate) => Some(rate),
            Err(MetricsError::ZeroPositiveCases(_)) => None,
            Err(err) => return Err(err),
        };

        Ok(RegionMetrics {
            region: row.region.clone(),
            total_cases,
            death_rate,
            hospitalized_currently: row.hospitalized_currently,
            hospitalized_cumulative: row.hospitalized_cumulative,
        })
    }

    /// Single-row selection shared by the per-region metrics: first row
    /// in load order.
    fn select_row(&self, region: &str) -> Result<&CaseRecord, MetricsError> {
        self.dataset
            .first_row_for_region(region)
            .ok_or_else(|| MetricsError::RegionNotFound(region.to_string()))
    }
}
