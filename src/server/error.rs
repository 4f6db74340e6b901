//! Error-to-HTTP response conversion.
//!
//! Route handlers return `Result<T, ApiError>`; every failure ends up as a
//! status code plus a `{"detail", "code"}` JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::utils::error::{ExtractionError, SelectionError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Extraction(e) if e.is_environmental() => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Extraction(_) => StatusCode::BAD_REQUEST,
            ApiError::Selection(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Extraction(ExtractionError::ToolNotFound) => "tool_not_found",
            ApiError::Extraction(ExtractionError::Failed(_))
            | ApiError::Extraction(ExtractionError::InvalidOutput(_)) => "extraction_failed",
            ApiError::Extraction(_) => "internal_error",
            ApiError::Selection(SelectionError::NoMediaFound) => "no_media_found",
            ApiError::Selection(SelectionError::NoDirectUrlAvailable) => "no_direct_url",
            ApiError::Selection(SelectionError::ChosenFormatHasNoUrl) => "chosen_format_has_no_url",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Server error in API handler");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        let body = json!({
            "detail": self.to_string(),
            "code": self.code(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_failure_produces_400() {
        let err = ApiError::from(ExtractionError::Failed("ERROR: Unsupported URL".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "extraction_failed");
        assert_eq!(err.to_string(), "ERROR: Unsupported URL");
    }

    #[test]
    fn missing_tool_produces_500() {
        let err = ApiError::from(ExtractionError::ToolNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "tool_not_found");
    }

    #[test]
    fn selection_errors_produce_404() {
        for e in [
            SelectionError::NoMediaFound,
            SelectionError::NoDirectUrlAvailable,
            SelectionError::ChosenFormatHasNoUrl,
        ] {
            let response = ApiError::from(e).into_response();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn worker_failure_is_internal() {
        let err = ApiError::from(ExtractionError::Worker("task panicked".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "internal_error");
    }
}
