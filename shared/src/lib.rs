//! Covidash Shared Library
//!
//! This crate contains the data model, dataset handling, and metric
//! aggregation logic used across the Covidash dashboard backend.
//!
//! # Modules
//!
//! - [`models`] - The per-row case record data model
//! - [`dataset`] - The immutable, load-once dataset
//! - [`source`] - Loading the upstream CSV feed into a dataset
//! - [`aggregate`] - Per-region metric derivation over a dataset
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use shared::aggregate::MetricsAggregator;
//! use shared::dataset::Dataset;
//! use shared::models::CaseRecord;
//!
//! let dataset = Dataset::from_records(vec![
//!     CaseRecord::new("GA", 100, 5).with_tests(1_000),
//!     CaseRecord::new("FL", 200, 20).with_tests(2_000),
//! ])
//! .unwrap();
//!
//! let aggregator = MetricsAggregator::new(Arc::new(dataset));
//! assert_eq!(aggregator.death_rate("FL").unwrap(), 10.0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod aggregate;
pub mod dataset;
pub mod models;
pub mod source;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
pub use validator;
