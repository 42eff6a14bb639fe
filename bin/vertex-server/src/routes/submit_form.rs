//! Contact form intake (`/api/submit-form`).
//!
//! Runs the shared validator, then inserts with the service credential and
//! echoes the stored row back.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;
use utoipa::OpenApi;
use vertex_core::{ContactStore, validate};

use crate::error::ServerError;
use crate::routes::{method_not_allowed, preflight};
use crate::schemas::contact::{SubmitFormRequest, SubmitFormResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(submit_form),
    components(schemas(SubmitFormRequest, SubmitFormResponse))
)]
pub struct SubmitFormApi;

/// Register the contact-form route.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/submit-form",
        post(submit_form)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}

/// Store a contact-form submission (`POST /api/submit-form`).
#[utoipa::path(
    post,
    path = "/api/submit-form",
    tag = "contact",
    request_body = SubmitFormRequest,
    responses(
        (status = 200, description = "Submission stored", body = SubmitFormResponse),
        (status = 400, description = "Validation failed"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Configuration or database error"),
    )
)]
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubmitFormRequest>, JsonRejection>,
) -> Result<Json<SubmitFormResponse>, ServerError> {
    let Json(req) = payload?;
    let row = validate(&req.into())?;

    let store = state
        .contacts
        .as_ref()
        .map_err(|e| ServerError::Configuration(e.clone()))?;
    let data = store.insert(row).await.map_err(ServerError::Storage)?;

    info!(rows = data.len(), "contact submission stored");
    Ok(Json(SubmitFormResponse {
        success: true,
        message: "Form submitted successfully".into(),
        data,
    }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
