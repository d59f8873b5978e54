//! Error mapping from the aggregation layer to HTTP responses.
//!
//! Per-query failures are recoverable: they become structured JSON error
//! bodies the chart frontend can turn into an empty/error chart state,
//! never a crashed request.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use shared::aggregate::MetricsError;
use thiserror::Error;

/// Structured error body returned by metric endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error kind.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Error type for metric endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A per-region query failed.
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            Self::Metrics(MetricsError::RegionNotFound(_)) => {
                (StatusCode::NOT_FOUND, "region_not_found")
            }
            Self::Metrics(MetricsError::ZeroPositiveCases(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "zero_positive_cases")
            }
        };

        let body = ErrorBody {
            error: kind.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_not_found_maps_to_404() {
        let response =
            ApiError::Metrics(MetricsError::RegionNotFound("TX".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_zero_positive_cases_maps_to_422() {
        let response =
            ApiError::Metrics(MetricsError::ZeroPositiveCases("AS".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
