//! Chat relay: transcript in, one completion call, reply text out.
//!
//! [`Relay::send_message`] prepends the fixed instruction block, forwards the
//! whole transcript to an OpenAI-compatible completion API and returns the
//! first choice's text. One outbound call per invocation, no retries.

use std::future::Future;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ChatMessage, Role, system_prompt};
use crate::config::{CompletionConfig, ENV_COMPLETION_API_KEY};
use crate::error::{ConfigError, RelayError, UpstreamError};

pub const MODEL: &str = "llama-3.3-70b-versatile";
pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 500;

/// Returned when the API answers without any content.
pub const FALLBACK_REPLY: &str = "Sorry, I could not generate a response.";

// ── Wire types ───────────────────────────────────────────────────────────────

/// Role on the wire; unlike [`Role`] it includes `system`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionRole {
    System,
    User,
    Assistant,
}

impl From<Role> for CompletionRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => CompletionRole::User,
            Role::Assistant => CompletionRole::Assistant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: CompletionRole,
    pub content: String,
}

/// Request body for `POST {base}/chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<CompletionMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub message: Option<CompletionChoiceMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Text of the first choice, if it has any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .filter(|s| !s.is_empty())
    }
}

// ── Backend seam ─────────────────────────────────────────────────────────────

/// Transport for completion requests.
pub trait CompletionBackend: Send + Sync + 'static {
    fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, UpstreamError>> + Send;
}

/// OpenAI-compatible HTTP backend (`POST {api_url}/chat/completions`).
#[derive(Debug, Clone)]
pub struct HttpCompletionBackend {
    endpoint: String,
    client: Client,
}

impl HttpCompletionBackend {
    pub fn new(api_url: &str) -> Self {
        let client = Client::builder()
            .user_agent(concat!("vertex-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self {
            endpoint: format!("{}/chat/completions", api_url.trim_end_matches('/')),
            client,
        }
    }
}

impl CompletionBackend for HttpCompletionBackend {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, UpstreamError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// OpenAI-style errors look like `{"error":{"message":..,"type":..}}`.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.chars().take(200).collect())
}

// ── Relay ────────────────────────────────────────────────────────────────────

/// Forwards transcripts to the completion API.
///
/// Holds no per-conversation state: every call is a function of the history,
/// the new message and the instruction block fixed at construction.
#[derive(Clone)]
pub struct Relay<B = HttpCompletionBackend> {
    backend: B,
    api_key: Option<String>,
    instructions: String,
}

impl<B> std::fmt::Debug for Relay<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("configured", &self.api_key.is_some())
            .field("instructions_len", &self.instructions.len())
            .finish_non_exhaustive()
    }
}

impl Relay<HttpCompletionBackend> {
    pub fn from_config(config: &CompletionConfig, whatsapp_number: Option<&str>) -> Self {
        Self::with_backend(
            HttpCompletionBackend::new(&config.api_url),
            config.api_key.clone(),
            whatsapp_number,
        )
    }
}

impl<B: CompletionBackend> Relay<B> {
    pub fn with_backend(backend: B, api_key: Option<String>, whatsapp_number: Option<&str>) -> Self {
        Self {
            backend,
            api_key,
            instructions: system_prompt(whatsapp_number),
        }
    }

    /// `false` when the credential is missing and every call would fail.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Build the request: instruction block, `history` in order, then the new
    /// user message.
    pub fn build_request(&self, new_message: &str, history: &[ChatMessage]) -> CompletionRequest {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(CompletionMessage {
            role: CompletionRole::System,
            content: self.instructions.clone(),
        });
        messages.extend(history.iter().map(|m| CompletionMessage {
            role: m.role.into(),
            content: m.content.clone(),
        }));
        messages.push(CompletionMessage {
            role: CompletionRole::User,
            content: new_message.to_owned(),
        });

        CompletionRequest {
            model: MODEL.to_owned(),
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }

    /// Send `new_message` with `history` as context and return the reply.
    ///
    /// Fails with [`RelayError::Configuration`] before any network access when
    /// the credential is missing.
    pub async fn send_message(
        &self,
        new_message: &str,
        history: &[ChatMessage],
    ) -> Result<String, RelayError> {
        let api_key = self.api_key.as_deref().ok_or(ConfigError::Missing {
            var: ENV_COMPLETION_API_KEY,
        })?;

        let request = self.build_request(new_message, history);
        debug!(
            history_len = history.len(),
            message_len = new_message.len(),
            "relaying chat message"
        );

        let response = self.backend.complete(api_key, &request).await.map_err(|e| {
            warn!(error = %e, "completion request failed");
            RelayError::Upstream(e)
        })?;

        Ok(response
            .first_text()
            .map(str::to_owned)
            .unwrap_or_else(|| FALLBACK_REPLY.to_owned()))
    }
}
