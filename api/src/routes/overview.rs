//! Overview chart endpoints.
//!
//! Backs the dashboard's Overview tab: the total-cases bar chart and the
//! deaths-vs-tests scatter plot. Both operate over the whole dataset and
//! take no parameters.

use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use shared::aggregate::{DeathsVsTestsPoint, RegionCases};

/// Response for the total-cases-by-region bar chart.
#[derive(Debug, Serialize, Deserialize)]
pub struct CasesByRegionResponse {
    /// One row per region, in first-encountered region order.
    pub regions: Vec<RegionCases>,
    /// Sum of positive cases across all rows.
    pub total_positive_cases: u64,
}

/// Response for the deaths-vs-tests scatter plot.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeathsVsTestsResponse {
    /// One point per dataset row, in load order.
    pub points: Vec<DeathsVsTestsPoint>,
    /// Number of points (equals the dataset row count).
    pub total_count: usize,
}

/// Creates the overview chart routes.
///
/// # Routes
///
/// - `GET /api/v1/cases-by-region` - Total positive cases per region
/// - `GET /api/v1/deaths-vs-tests` - Raw deaths/tests point per row
pub fn overview_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/cases-by-region", get(cases_by_region))
        .route("/api/v1/deaths-vs-tests", get(deaths_vs_tests))
        .with_state(state)
}

async fn cases_by_region(State(state): State<AppState>) -> Json<CasesByRegionResponse> {
    let regions = state.aggregator().total_cases_by_region();
    let total_positive_cases = regions.iter().map(|r| r.positive_cases).sum();

    Json(CasesByRegionResponse {
        regions,
        total_positive_cases,
    })
}

async fn deaths_vs_tests(State(state): State<AppState>) -> Json<DeathsVsTestsResponse> {
    let points = state.aggregator().deaths_vs_tests_series();
    let total_count = points.len();

    Json(DeathsVsTestsResponse {
        points,
        total_count,
    })
}
