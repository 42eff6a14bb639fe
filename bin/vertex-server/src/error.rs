//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a JSON `{"error": ...}` body with an appropriate status code.
//!
//! **Security note:** configuration and upstream errors are logged with full
//! detail but only a generic message is returned to the caller, so provider
//! messages, URLs, and credential names never leak to visitors.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};
use vertex_core::{ConfigError, RelayError, UpstreamError, ValidationError};

/// All errors that can occur in the vertex-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Contact-form input failed the shared validator.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The route exists but not for this HTTP method.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// A credential the feature needs is missing.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The contact database rejected or failed the insert.
    #[error("storage error: {0}")]
    Storage(#[source] UpstreamError),

    /// The completion API failed.
    #[error("completion error: {0}")]
    Completion(#[source] UpstreamError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            // Client-facing errors: expose the message directly.
            ServerError::Validation(e) => {
                debug!(error = ?e, "contact form rejected");
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_owned(),
            ),

            // Internal errors: log the full detail, return a generic message.
            ServerError::Configuration(e) => {
                error!(error = %e, "missing server configuration");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_owned(),
                )
            }
            ServerError::Storage(e) => {
                error!(error = %e, "contact submission insert failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to save submission".to_owned(),
                )
            }
            ServerError::Completion(e) => {
                error!(error = %e, "completion API call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "The assistant is unavailable right now. Please try again.".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

impl From<RelayError> for ServerError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::Configuration(c) => ServerError::Configuration(c),
            RelayError::Upstream(u) => ServerError::Completion(u),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
