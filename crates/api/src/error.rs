use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use warehouse_core::error::CoreError;
use warehouse_db::store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures, and adds the HTTP-specific id mismatch. Implements
/// [`IntoResponse`] so every failure maps to a status code in one place.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `warehouse_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by the store gateway.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- Bodiless 404 ---
            AppError::Core(CoreError::NotFound { entity, id }) => {
                tracing::debug!(entity, id, "Not found");
                return StatusCode::NOT_FOUND.into_response();
            }

            // --- CoreError variants ---
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }

            // --- Store errors ---
            AppError::Store(store) => classify_store_error(store),

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

/// Classify a store failure into an HTTP status, error code, and message.
///
/// - Constraint violations map to 400.
/// - An update conflict on a row that still exists maps to 500; it is not
///   retried or merged.
/// - An unreachable store maps to 503.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Constraint(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        StoreError::ConcurrencyConflict { entity, id } => {
            tracing::error!(entity, id, "Update conflict on a row that still exists");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONCURRENCY_CONFLICT",
                err.to_string(),
            )
        }
        StoreError::Unavailable(detail) => {
            tracing::error!(error = %detail, "Store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "The data store is unavailable".to_string(),
            )
        }
        StoreError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
