//! Loading the upstream CSV feed into a [`Dataset`].
//!
//! The upstream feed (covidtracking.com "states/current" export) is a
//! CSV document with one row per state. This module maps its column
//! names onto [`CaseRecord`] fields, parses the document, and builds the
//! immutable dataset served for the rest of the process lifetime.
//!
//! Column mapping: `state` -> region, `positive`, `death`,
//! `totalTestResults`, `hospitalizedCurrently`, `hospitalizedCumulative`,
//! and `date` (a YYYYMMDD integer). Blank numeric cells mean "not
//! reported" and are mapped to zero.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::dataset::{Dataset, DatasetError};
use crate::models::CaseRecord;

/// Errors that can occur while loading the dataset.
///
/// All variants are fatal at startup: the process cannot serve any query
/// without a dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The feed could not be fetched.
    #[error("Failed to fetch feed: {0}")]
    Http(#[from] reqwest::Error),

    /// A local feed file could not be read.
    #[error("Failed to read feed file: {0}")]
    Io(#[from] std::io::Error),

    /// The feed document is not valid CSV or a cell failed to parse.
    #[error("Failed to parse feed: {0}")]
    Csv(#[from] csv::Error),

    /// The parsed rows do not form a valid dataset (empty feed or blank
    /// region).
    #[error("Invalid dataset: {0}")]
    Dataset(#[from] DatasetError),
}

/// One raw row of the upstream feed, with the feed's own column names.
///
/// Numeric cells are optional because the feed leaves unknown values
/// blank; conversion to [`CaseRecord`] maps those to zero.
#[derive(Debug, Deserialize)]
struct FeedRow {
    state: String,
    date: Option<u32>,
    positive: Option<u64>,
    death: Option<u64>,
    #[serde(rename = "totalTestResults")]
    total_test_results: Option<u64>,
    #[serde(rename = "hospitalizedCurrently")]
    hospitalized_currently: Option<u64>,
    #[serde(rename = "hospitalizedCumulative")]
    hospitalized_cumulative: Option<u64>,
}

impl FeedRow {
    fn into_record(self) -> CaseRecord {
        let mut record = CaseRecord::new(self.state, self.positive.unwrap_or(0), self.death.unwrap_or(0))
            .with_tests(self.total_test_results.unwrap_or(0))
            .with_hospitalized(
                self.hospitalized_currently.unwrap_or(0),
                self.hospitalized_cumulative.unwrap_or(0),
            );
        if let Some(date) = self.date.and_then(parse_feed_date) {
            record = record.with_date(date);
        }
        record
    }
}

/// Parses the feed's YYYYMMDD integer date. Returns None (and logs) for
/// values that do not form a calendar date.
fn parse_feed_date(raw: u32) -> Option<NaiveDate> {
    let year = i32::try_from(raw / 10_000).ok()?;
    let month = (raw / 100) % 100;
    let day = raw % 100;
    let date = NaiveDate::from_ymd_opt(year, month, day);
    if date.is_none() {
        tracing::warn!(raw, "Ignoring unparseable feed date");
    }
    date
}

/// Parses CSV feed content into records, preserving row order.
///
/// # Errors
///
/// Returns an error if the document is not valid CSV or a cell cannot be
/// deserialized.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<CaseRecord>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<FeedRow>() {
        records.push(row?.into_record());
    }
    Ok(records)
}

/// Loads a dataset from a local CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or does not form
/// a valid dataset.
pub fn load_from_path(path: &Path) -> Result<Dataset, LoadError> {
    tracing::info!(path = %path.display(), "Loading dataset from file");
    let file = File::open(path)?;
    let records = parse_csv(file)?;
    let dataset = Dataset::from_records(records)?;
    tracing::info!(
        records = dataset.len(),
        regions = dataset.regions().len(),
        "Dataset loaded"
    );
    Ok(dataset)
}

/// Fetches the feed over HTTP and builds the dataset.
///
/// The connection lives only for the duration of this call; once the
/// dataset is built, no network resource is held.
///
/// # Errors
///
/// Returns an error if the feed is unreachable, responds with a non-2xx
/// status, is malformed, or is empty.
pub async fn fetch_dataset(url: &str) -> Result<Dataset, LoadError> {
    tracing::info!(url, "Fetching dataset");
    let body = reqwest::get(url).await?.error_for_status()?.text().await?;
    let records = parse_csv(body.as_bytes())?;
    let dataset = Dataset::from_records(records)?;
    tracing::info!(
        records = dataset.len(),
        regions = dataset.regions().len(),
        "Dataset loaded"
    );
    Ok(dataset)
}
