//! Chat relay endpoint (`/api/chat`).
//!
//! Forwards a visitor message to the completion API with the server-held
//! credential, so the key never reaches the browser.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use tracing::debug;
use utoipa::OpenApi;
use vertex_core::{ChatMessage, HandoffDetails, should_handoff, whatsapp_link};

use crate::error::ServerError;
use crate::routes::{method_not_allowed, preflight};
use crate::schemas::chat::{ChatRequest, ChatResponse};
use crate::state::AppState;

/// Upper bound on a single visitor message.
const MAX_MESSAGE_BYTES: usize = 16 * 1024;

#[derive(OpenApi)]
#[openapi(paths(chat), components(schemas(ChatRequest, ChatResponse)))]
pub struct ChatApi;

/// Register the chat route.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/chat",
        post(chat).options(preflight).fallback(method_not_allowed),
    )
}

/// Relay one chat message (`POST /api/chat`).
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Empty or oversized message"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Completion API not configured"),
        (status = 502, description = "Completion API failed"),
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ServerError> {
    let Json(req) = payload?;
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ServerError::BadRequest("Message must not be empty".into()));
    }
    if message.len() > MAX_MESSAGE_BYTES {
        return Err(ServerError::BadRequest(format!(
            "Message exceeds {MAX_MESSAGE_BYTES} bytes"
        )));
    }

    let reply = state.relay.send_message(message, &req.history).await?;

    let mut visible = req.history;
    visible.push(ChatMessage::user(message));
    let handoff = should_handoff(&visible);
    let handoff_url = match (&state.config.handoff.whatsapp_number, handoff) {
        (Some(number), true) => Some(whatsapp_link(number, &HandoffDetails::default())),
        _ => None,
    };
    debug!(handoff, "chat reply relayed");

    Ok(Json(ChatResponse {
        reply,
        handoff,
        handoff_url,
    }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
