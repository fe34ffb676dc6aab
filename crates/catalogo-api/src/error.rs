//! Error types for the query API layer.
//!
//! [`ApiError`] unifies all failure modes into a single enum that is
//! converted into an HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! error response is logged server-side before it is returned, and the
//! body is always a complete JSON object -- no partial payloads.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalogo_core::WindowError;
use catalogo_db::DbError;

/// Errors that can occur in the query API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The `date` query parameter was malformed (HTTP 400).
    #[error(transparent)]
    InvalidDate(#[from] WindowError),

    /// A data layer operation failed (HTTP 500).
    #[error("storage error: {0}")]
    Db(#[from] DbError),

    /// Any other unexpected failure (HTTP 500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidDate(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Db(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("storage error: {e}")),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %message, "request rejected");
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
