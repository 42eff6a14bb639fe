//! AI chat widget: transcript types, relay, handoff detection, session.

pub mod handoff;
mod prompt;
pub mod relay;
pub mod session;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

pub use prompt::system_prompt;

/// Author of a transcript record.
///
/// No `System` variant: only the relay emits the instruction block, so a
/// client-supplied history carrying `"system"` fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
