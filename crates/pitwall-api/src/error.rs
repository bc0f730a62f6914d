//! # API Error Types
//!
//! Unified error handling for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pitwall_analytics::AnalyticsError;
use thiserror::Error;

/// API-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Analytics(err) => match err {
                AnalyticsError::NotFound { .. } | AnalyticsError::UnknownDriver(_) => {
                    StatusCode::NOT_FOUND
                }
                AnalyticsError::NoCommonRaces { .. }
                | AnalyticsError::NoValidComparisons { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                AnalyticsError::Domain(_) => StatusCode::BAD_REQUEST,
                AnalyticsError::Conversion(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get error code for the response body
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Analytics(err) => err.error_code(),
            Self::InvalidInput(_) => "INVALID_INPUT",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = serde_json::json!({
            "error": {
                "message": self.to_string(),
                "code": self.error_code(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
