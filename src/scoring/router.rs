use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::json;

use super::rolling::{HistoryError, TripHistory};
use super::service::{ScoringService, ScoringServiceError};
use crate::inspection::{DriverId, InspectionSnapshot};

/// Router exposing the stateless scoring endpoints.
pub fn scoring_router<H>(service: Arc<ScoringService<H>>) -> Router
where
    H: TripHistory + 'static,
{
    Router::new()
        .route(
            "/api/v1/inspections/scorecard",
            post(scorecard_handler::<H>),
        )
        .route(
            "/api/v1/drivers/:driver_id/risk",
            get(driver_risk_handler::<H>),
        )
        .with_state(service)
}

pub(crate) async fn scorecard_handler<H>(
    State(service): State<Arc<ScoringService<H>>>,
    axum::Json(snapshot): axum::Json<InspectionSnapshot>,
) -> Response
where
    H: TripHistory + 'static,
{
    match service.scorecard(&snapshot, Utc::now()) {
        Ok(scorecard) => (StatusCode::OK, axum::Json(scorecard)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn driver_risk_handler<H>(
    State(service): State<Arc<ScoringService<H>>>,
    Path(driver_id): Path<String>,
) -> Response
where
    H: TripHistory + 'static,
{
    match service.driver_risk(&DriverId(driver_id), Utc::now()) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ScoringServiceError) -> Response {
    let status = match &error {
        ScoringServiceError::History(HistoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
