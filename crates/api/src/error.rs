use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use institute_db::store::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as `{"error": "<message>"}`. Storage, body-parsing
/// and internal failures all surface as 500 with the underlying message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No `Authorization` header on a mutating request.
    #[error("Unauthorized")]
    Unauthorized,

    /// Unmatched route, method or malformed id, or an update on a missing row.
    #[error("Not found")]
    NotFound,

    /// The testimonial store rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request did not finish within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request body was not valid JSON for the expected shape.
    #[error(transparent)]
    Body(#[from] serde_json::Error),

    /// Any other failure, including recovered handler panics.
    #[error("{0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Store(_) | AppError::Body(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %message, "Request failed");
        }

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}
