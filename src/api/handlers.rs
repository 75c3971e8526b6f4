//! HTTP request handlers for the Attendance Engine API.
//!
//! This module contains the handler functions for all API endpoints. The
//! handlers are thin: all attendance logic lives in [`crate::pipeline`].

use std::time::Instant;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::device::DeviceAdapter;

use super::response::{ApiErrorResponse, AttendanceResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<A>(state: AppState<A>) -> Router
where
    A: DeviceAdapter + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/attendance", get(attendance_handler::<A>))
        .with_state(state)
}

/// Handler for the GET /attendance endpoint.
///
/// Runs the full acquisition and resolution pipeline against the configured
/// device and returns one shift record per employee. A degraded run (roster
/// missing, record count below the acceptance floor) still returns 200 with
/// `low_confidence` set; only a run with zero usable records fails.
async fn attendance_handler<A>(State(state): State<AppState<A>>) -> impl IntoResponse
where
    A: DeviceAdapter + Clone + Send + Sync + 'static,
{
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance request");

    let start_time = Instant::now();
    match state.pipeline().run().await {
        Ok(outcome) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                employees = outcome.resolutions.len(),
                attempts = outcome.attempts,
                low_confidence = outcome.low_confidence,
                duration_us = duration.as_micros(),
                "Attendance resolution completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(AttendanceResponse::from(outcome)),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Attendance resolution failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}
