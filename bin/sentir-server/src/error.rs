//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a JSON-body HTTP response with an appropriate status code.
//!
//! **Security note:** Internal errors (Model, Database, Internal) are
//! logged with full detail but only a generic message is returned to the
//! caller so that file paths, SQL, or other implementation details never
//! leak to clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::ValidationError;

/// All errors that can occur in the sentir-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The submitted text exceeds the configured length cap.  Distinct
    /// from [`ServerError::BadRequest`] so clients know to shorten the
    /// input rather than resubmit as-is.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Artifacts not loaded; the caller may retry after backoff.
    #[error("service not ready: {0}")]
    NotReady(String),

    /// Propagated from the inference pipeline.
    #[error("model error: {0}")]
    Model(#[from] sentir_model::ModelError),

    /// Propagated from the SQLite (or other) store.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            // Client-facing errors: expose the message directly.
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::PayloadTooLarge(m) => (StatusCode::PAYLOAD_TOO_LARGE, m.clone()),
            ServerError::NotReady(m) => (StatusCode::SERVICE_UNAVAILABLE, m.clone()),

            // Internal errors: log the full detail, return a generic message.
            ServerError::Model(e) => {
                error!(error = %e, "prediction failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_owned())
            }
            ServerError::Database(e) => {
                error!(error = %e, "failed to save feedback");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not save feedback".to_owned(),
                )
            }
            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_owned())
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

impl From<ValidationError> for ServerError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::TextTooLong => ServerError::PayloadTooLarge(e.to_string()),
            _ => ServerError::BadRequest(e.to_string()),
        }
    }
}
