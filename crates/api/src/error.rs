//! HTTP rendering of domain and storage errors.
//!
//! Every error leaves the API as `{"error": <message>, "code": <CODE>}`.
//! Storage failures are classified by what the caller can do about them;
//! anything unexpected becomes a 500 whose detail only reaches the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kennel_core::error::CoreError;
use serde_json::json;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Errors from a store, Postgres or in-memory.
    #[error("Storage error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request input not covered by DTO validation.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Status, machine-readable code and client-facing message.
type Rendered = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => render_core(core),
            AppError::Database(err) => render_storage(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}

fn render_core(err: &CoreError) -> Rendered {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::NotImplemented(msg) => {
            (StatusCode::NOT_IMPLEMENTED, "NOT_IMPLEMENTED", msg.clone())
        }
    }
}

/// - `RowNotFound` is a 404.
/// - A unique violation on a `uq_*` constraint is a 409.
/// - A foreign key violation means the body referenced a record that does
///   not exist (an unknown `customerId`, `speciesId`, ...), so it is a 400.
/// - Pool exhaustion is a 503 the client may retry.
/// - A stored row that no longer decodes is logged with its own code.
/// - Everything else is a sanitized 500.
fn render_storage(err: &sqlx::Error) -> Rendered {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) if constraint.starts_with("uq_") => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                ),
                Some(FOREIGN_KEY_VIOLATION) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_REFERENCE",
                    format!("Referenced record does not exist ({constraint})"),
                ),
                _ => internal(err),
            }
        }
        sqlx::Error::PoolTimedOut => {
            tracing::warn!("Storage pool exhausted");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORAGE_UNAVAILABLE",
                "Storage is temporarily unavailable".to_string(),
            )
        }
        sqlx::Error::Decode(_) | sqlx::Error::ColumnDecode { .. } => {
            tracing::error!(error = %err, "Stored record failed to decode");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_DECODE_ERROR",
                "A stored record could not be read".to_string(),
            )
        }
        other => internal(other),
    }
}

fn internal(err: &sqlx::Error) -> Rendered {
    tracing::error!(error = %err, "Storage error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
