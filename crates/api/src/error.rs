use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mintpress_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mintpress_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::InvalidBatchSize { .. } => {
                    (StatusCode::BAD_REQUEST, "INVALID_BATCH_SIZE", core.message())
                }
                // The store's diagnostic is passed through so callers can act on it.
                CoreError::Storage { message, cleanup } => {
                    tracing::warn!(
                        error = %message,
                        cleanup_error = cleanup.as_deref(),
                        "Asset store failure"
                    );
                    (StatusCode::BAD_GATEWAY, "STORAGE_FAILURE", message.clone())
                }
                CoreError::Staging(msg) => {
                    tracing::error!(error = %msg, "Asset staging failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORAGE_FAILURE",
                        "Failed to stage the uploaded asset".to_string(),
                    )
                }
                CoreError::Cleanup { locator, .. } => {
                    tracing::error!(error = %core, "Staged asset cleanup failure");
                    let message = match locator {
                        Some(uri) => format!("Asset stored at {uri} but local cleanup failed"),
                        None => "Local cleanup failed".to_string(),
                    };
                    (StatusCode::INTERNAL_SERVER_ERROR, "CLEANUP_FAILURE", message)
                }
            },

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
