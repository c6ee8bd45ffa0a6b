//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::DatabaseError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// Apologetic body for the chat proxy — carries a canned reply alongside the error.
#[derive(Debug, Serialize)]
struct ChatErrorBody {
    error: String,
    response: &'static str,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Chat provider unavailable: {0}")]
    ChatUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(detail) => error_response(
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                detail,
            ),
            ApiError::NotFound(detail) => error_response(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                detail,
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::ChatUnavailable(detail) => {
                tracing::error!(detail, "chat provider unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ChatErrorBody {
                        error: detail,
                        response: "I'm having trouble connecting right now.",
                    }),
                )
                    .into_response()
            }
        }
    }
}

fn error_response(status: StatusCode, code: &'static str, message: String) -> Response {
    let body = ErrorBody {
        error: ErrorDetail { code, message },
    };
    (status, Json(body)).into_response()
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn bad_request_returns_400() {
        let response = ApiError::BadRequest("missing field `name`".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert_eq!(json["error"]["message"], "missing field `name`");
    }

    #[tokio::test]
    async fn not_found_returns_404() {
        let response = ApiError::NotFound("no such patient".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn internal_returns_500_and_hides_detail() {
        let response = ApiError::Internal("something broke".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn chat_unavailable_returns_apologetic_500() {
        let response = ApiError::ChatUnavailable("all models failed".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["response"], "I'm having trouble connecting right now.");
        assert_eq!(json["error"], "all models failed");
    }

    #[tokio::test]
    async fn database_error_maps_to_internal() {
        let api_err: ApiError = DatabaseError::ConstraintViolation("fk".into()).into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
