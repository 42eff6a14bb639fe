use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vertex_core::ChatMessage;

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// The visitor's new message.
    pub message: String,
    /// Prior transcript, oldest first. Roles are `"user"` or `"assistant"`.
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub history: Vec<ChatMessage>,
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// Assistant reply text.
    pub reply: String,
    /// Whether the latest visitor message asked for a human.
    pub handoff: bool,
    /// WhatsApp deep link, when `handoff` is set and a number is configured.
    pub handoff_url: Option<String>,
}
