//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use recast::RecastError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from client.
    BadRequest(String),
    /// Request conflicts with the session state.
    Conflict(String),
    /// Internal server error.
    Internal(String),
    /// Error from the recast library.
    Recast(RecastError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

fn classify(err: &RecastError) -> (StatusCode, &'static str) {
    match err {
        RecastError::RowOutOfRange { .. } | RecastError::CandidateOutOfRange { .. } => {
            (StatusCode::NOT_FOUND, "not_found")
        }
        RecastError::InvalidTransition { .. }
        | RecastError::StaleGeneration { .. }
        | RecastError::NothingToExport => (StatusCode::CONFLICT, "conflict"),
        RecastError::AnswerMismatch { .. } => (StatusCode::BAD_REQUEST, "answer_mismatch"),
        RecastError::IncompleteRow { .. } => (StatusCode::BAD_REQUEST, "incomplete_row"),
        RecastError::Provider { .. } | RecastError::BatchExhausted { .. } => {
            (StatusCode::BAD_GATEWAY, "provider_error")
        }
        RecastError::Config(_)
        | RecastError::UnsupportedFormat(_)
        | RecastError::MissingColumns { .. }
        | RecastError::EmptyData(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
            ApiError::Recast(e) => {
                let (status, error) = classify(&e);
                (status, error, e.to_string())
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<RecastError> for ApiError {
    fn from(err: RecastError) -> Self {
        ApiError::Recast(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Recast(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (RecastError::RowOutOfRange { index: 9, len: 3 }, StatusCode::NOT_FOUND),
            (RecastError::NothingToExport, StatusCode::CONFLICT),
            (
                RecastError::AnswerMismatch {
                    answer: "Delhi".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                RecastError::provider("gemini", "timeout"),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
