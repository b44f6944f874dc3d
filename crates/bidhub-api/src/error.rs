//! Maps domain errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use bidhub_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Whether retrying the same request may succeed.
    pub retryable: bool,
}

/// Newtype carrying an [`AppError`] across the Axum response boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err.kind {
            ErrorKind::InvalidAmount | ErrorKind::AuctionClosed | ErrorKind::Validation => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Contention | ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Database
            | ErrorKind::Serialization
            | ErrorKind::Configuration
            | ErrorKind::Internal => {
                tracing::error!(error = %err, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message: err.message,
            retryable: err.kind.is_retryable(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn kinds_map_to_expected_statuses() {
        assert_eq!(
            status_of(AppError::invalid_amount("too low")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::auction_closed("closed")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::contention("busy")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::unauthorized("no token")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::forbidden("wrong role")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::not_found("missing")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::internal("boom")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn contention_is_flagged_retryable() {
        assert!(ErrorKind::Contention.is_retryable());
        assert!(!ErrorKind::AuctionClosed.is_retryable());
    }
}
