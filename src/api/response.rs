//! Response types for the Attendance Engine API.
//!
//! This module defines the success and error response structures for the
//! HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::ShiftResolution;
use crate::pipeline::PipelineOutcome;

/// Success body for the `/attendance` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceResponse {
    /// The instant the shift windows were resolved against.
    pub evaluated_at: NaiveDateTime,
    /// How many device fetch attempts the run took.
    pub attempts: u32,
    /// True when the run succeeded in a degraded mode (missing identity
    /// roster or fewer records than desired).
    pub low_confidence: bool,
    /// One shift record per employee seen in the punch data.
    pub resolutions: Vec<ShiftResolution>,
}

impl From<PipelineOutcome> for AttendanceResponse {
    fn from(outcome: PipelineOutcome) -> Self {
        Self {
            evaluated_at: outcome.evaluated_at,
            attempts: outcome.attempts,
            low_confidence: outcome.low_confidence,
            resolutions: outcome.resolutions,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidWindowConfig { field, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    format!("Invalid window configuration '{}'", field),
                    message,
                ),
            },
            EngineError::DataUnavailable { attempts, source } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::with_details(
                    "DATA_UNAVAILABLE",
                    format!("No usable punch data after {} attempt(s)", attempts),
                    source.to_string(),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceError;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_data_unavailable_maps_to_service_unavailable() {
        let engine_error = EngineError::DataUnavailable {
            attempts: 3,
            source: DeviceError::Connection("host unreachable".to_string()),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(api_error.error.code, "DATA_UNAVAILABLE");
        assert!(api_error
            .error
            .details
            .unwrap()
            .contains("host unreachable"));
    }

    #[test]
    fn test_config_errors_map_to_internal_error() {
        let engine_error = EngineError::InvalidWindowConfig {
            field: "check_in_buffer".to_string(),
            message: "start must be less than end".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
