//! Data models for the Covidash dashboard backend.
//!
//! This module contains the core data structure for one row of the
//! upstream COVID-19 statistics feed.

pub mod record;

pub use record::{CaseRecord, RecordValidationError};
