use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use projects_core::error::CoreError;
use projects_db::error::{ConstraintKind, StoreError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`StoreError`] and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A repository error from `projects_db`.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";
const UNAVAILABLE_MESSAGE: &str = "The store is temporarily unavailable";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - `NotFound` maps to 404.
/// - A foreign-key violation means the referenced project is missing: 404.
/// - A unique violation maps to 409.
/// - `StoreUnavailable` maps to 503 and `Internal` to 500, both sanitized.
/// - `Domain` follows the wrapped [`CoreError`].
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        StoreError::Validation { .. } => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
        StoreError::ConstraintViolation {
            kind: ConstraintKind::ForeignKey,
            op,
            ..
        } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{op}: referenced project not found"),
        ),
        StoreError::ConstraintViolation { .. } => {
            (StatusCode::CONFLICT, "CONFLICT", err.to_string())
        }
        StoreError::StoreUnavailable { op, source } => {
            tracing::error!(op, error = %source, "Store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORE_UNAVAILABLE",
                UNAVAILABLE_MESSAGE.to_string(),
            )
        }
        StoreError::Internal { op, source } => {
            tracing::error!(op, error = %source, "Store error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
        StoreError::Domain { op, source } => classify_core_error(op, source),
    }
}

fn classify_core_error(op: &str, err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{op}: {entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("{op}: {msg}"),
        ),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", format!("{op}: {msg}")),
        CoreError::StoreUnavailable(msg) => {
            tracing::error!(op, error = %msg, "Store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORE_UNAVAILABLE",
                UNAVAILABLE_MESSAGE.to_string(),
            )
        }
        CoreError::Internal(msg) => {
            tracing::error!(op, error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}
