//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers.

use shared::aggregate::MetricsAggregator;
use shared::dataset::Dataset;
use shared::models::CaseRecord;
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// Holds the metric aggregator over the load-once dataset. The dataset
/// is immutable after startup, so cloning the state only clones the
/// shared handle; no locking is needed anywhere.
#[derive(Debug, Clone)]
pub struct AppState {
    aggregator: MetricsAggregator,
}

impl AppState {
    /// Creates a new application state over the given dataset.
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self {
            aggregator: MetricsAggregator::new(Arc::new(dataset)),
        }
    }

    /// Returns the metric aggregator.
    #[must_use]
    pub fn aggregator(&self) -> &MetricsAggregator {
        &self.aggregator
    }

    /// Creates a new application state over a small fixed dataset.
    ///
    /// This is useful for development and testing: two GA rows (so the
    /// single-row policy is observable), one FL row, and one AS row with
    /// zero positives (so the undefined death rate is observable).
    #[must_use]
    pub fn with_sample_dataset() -> Self {
        let dataset = Dataset::from_records(vec![
            CaseRecord::new("GA", 100, 5)
                .with_tests(1_000)
                .with_hospitalized(10, 50),
            CaseRecord::new("GA", 50, 2)
                .with_tests(500)
                .with_hospitalized(10, 50),
            CaseRecord::new("FL", 200, 20)
                .with_tests(2_000)
                .with_hospitalized(30, 90),
            CaseRecord::new("AS", 0, 0).with_tests(2_140),
        ])
        .expect("sample dataset is valid");
        Self::new(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_with_sample_dataset() {
        let state = AppState::with_sample_dataset();

        assert_eq!(state.aggregator().dataset().len(), 4);
        assert_eq!(
            state.aggregator().dataset().regions(),
            vec!["GA", "FL", "AS"]
        );
    }

    #[test]
    fn test_app_state_is_clone() {
        let state = AppState::with_sample_dataset();
        let state2 = state.clone();

        // Both share the same immutable dataset
        assert_eq!(
            state.aggregator().dataset().len(),
            state2.aggregator().dataset().len()
        );
    }
}
