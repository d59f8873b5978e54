//! Per-region endpoints.
//!
//! Backs the dashboard's region tab: the selector options, the
//! hospitalization chart, the death-rate gauge, and a combined summary
//! so the frontend can refresh the whole tab in one round-trip.
//!
//! When a region has multiple rows, the single-row metrics use the first
//! row in load order (the dataset's documented selection policy).

use crate::routes::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shared::aggregate::{HospitalizationSnapshot, RegionMetrics};

/// Response for the region listing (dropdown options).
#[derive(Debug, Serialize, Deserialize)]
pub struct RegionListResponse {
    /// Distinct regions in first-encountered order.
    pub regions: Vec<String>,
    /// Number of distinct regions.
    pub total_count: usize,
}

/// Response for the death-rate gauge.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeathRateResponse {
    /// Region identifier.
    pub region: String,
    /// Death-rate percentage. Not clamped; inconsistent data can exceed
    /// 100.
    pub death_rate: f64,
}

/// Creates the per-region routes.
///
/// # Routes
///
/// - `GET /api/v1/regions` - Region selector options
/// - `GET /api/v1/regions/{region}/hospitalization` - Hospitalization chart
/// - `GET /api/v1/regions/{region}/death-rate` - Death-rate gauge
/// - `GET /api/v1/regions/{region}/summary` - Combined region metrics
pub fn region_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/regions", get(list_regions))
        .route(
            "/api/v1/regions/{region}/hospitalization",
            get(hospitalization),
        )
        .route("/api/v1/regions/{region}/death-rate", get(death_rate))
        .route("/api/v1/regions/{region}/summary", get(region_summary))
        .with_state(state)
}

async fn list_regions(State(state): State<AppState>) -> Json<RegionListResponse> {
    let regions: Vec<String> = state
        .aggregator()
        .dataset()
        .regions()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let total_count = regions.len();

    Json(RegionListResponse {
        regions,
        total_count,
    })
}

async fn hospitalization(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Result<Json<HospitalizationSnapshot>, ApiError> {
    let snapshot = state.aggregator().hospitalization_snapshot(&region)?;
    Ok(Json(snapshot))
}

async fn death_rate(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Result<Json<DeathRateResponse>, ApiError> {
    let rate = state.aggregator().death_rate(&region)?;
    Ok(Json(DeathRateResponse {
        region,
        death_rate: rate,
    }))
}

async fn region_summary(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Result<Json<RegionMetrics>, ApiError> {
    let metrics = state.aggregator().region_metrics(&region)?;
    Ok(Json(metrics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn create_test_router() -> Router {
        region_routes(AppState::with_sample_dataset())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_list_regions_in_first_encountered_order() {
        let (status, json) = get_json(create_test_router(), "/api/v1/regions").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_count"], 3);
        assert_eq!(json["regions"][0], "GA");
        assert_eq!(json["regions"][1], "FL");
        assert_eq!(json["regions"][2], "AS");
    }

    #[tokio::test]
    async fn test_hospitalization_snapshot() {
        let (status, json) =
            get_json(create_test_router(), "/api/v1/regions/FL/hospitalization").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["region"], "FL");
        assert_eq!(json["currently"], 30);
        assert_eq!(json["cumulative"], 90);
    }

    #[tokio::test]
    async fn test_hospitalization_unknown_region_is_404() {
        let (status, json) =
            get_json(create_test_router(), "/api/v1/regions/TX/hospitalization").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "region_not_found");
    }

    #[tokio::test]
    async fn test_death_rate_uses_first_loaded_row() {
        // GA has two rows in the sample dataset; the first (5/100) wins
        let (status, json) = get_json(create_test_router(), "/api/v1/regions/GA/death-rate").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["region"], "GA");
        assert_eq!(json["death_rate"], 5.0);
    }

    #[tokio::test]
    async fn test_death_rate_zero_positives_is_422() {
        let (status, json) = get_json(create_test_router(), "/api/v1/regions/AS/death-rate").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "zero_positive_cases");
    }

    #[tokio::test]
    async fn test_death_rate_unknown_region_is_404() {
        let (status, json) = get_json(create_test_router(), "/api/v1/regions/TX/death-rate").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "region_not_found");
    }

    #[tokio::test]
    async fn test_region_summary() {
        let (status, json) = get_json(create_test_router(), "/api/v1/regions/GA/summary").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["region"], "GA");
        assert_eq!(json["total_cases"], 150);
        assert_eq!(json["death_rate"], 5.0);
        assert_eq!(json["hospitalized_currently"], 10);
        assert_eq!(json["hospitalized_cumulative"], 50);
    }

    #[tokio::test]
    async fn test_region_summary_undefined_rate_is_null() {
        let (status, json) = get_json(create_test_router(), "/api/v1/regions/AS/summary").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["death_rate"].is_null());
        assert_eq!(json["total_cases"], 0);
    }
}
