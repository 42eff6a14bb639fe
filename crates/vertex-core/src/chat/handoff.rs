//! Handoff detection and the WhatsApp deep link.
//!
//! Detection is a plain substring match on the most recent user message. It
//! has no negation handling: "please don't contact me" still triggers.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::{ChatMessage, Role};

/// Phrases that signal the visitor wants a human.
pub const HANDOFF_KEYWORDS: [&str; 6] = [
    "whatsapp",
    "contact",
    "talk",
    "call",
    "reach out",
    "get in touch",
];

pub const WA_ME_BASE: &str = "https://wa.me/";

const GREETING: &str = "Hi! I am interested in your engineering services";

/// Characters left as-is by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// `true` when the latest user message contains a handoff keyword.
///
/// Assistant messages are never inspected; an empty history yields `false`.
pub fn should_handoff(history: &[ChatMessage]) -> bool {
    let Some(last_user) = history.iter().rev().find(|m| m.role == Role::User) else {
        return false;
    };
    let content = last_user.content.to_lowercase();
    HANDOFF_KEYWORDS.iter().any(|k| content.contains(k))
}

/// Optional visitor details appended to the WhatsApp greeting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandoffDetails {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl HandoffDetails {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: non_empty(name.into()),
            email: non_empty(email.into()),
        }
    }
}

/// Build `https://wa.me/<number>?text=<greeting>`.
pub fn whatsapp_link(number: &str, details: &HandoffDetails) -> String {
    let mut text = GREETING.to_owned();
    match (&details.name, &details.email) {
        (Some(name), Some(email)) => {
            text.push_str(&format!(".\n\nName: {name}\nEmail: {email}"));
        }
        (Some(name), None) => text.push_str(&format!(".\n\nName: {name}")),
        (None, Some(email)) => text.push_str(&format!(".\n\nEmail: {email}")),
        (None, None) => {}
    }
    format!(
        "{WA_ME_BASE}{number}?text={}",
        utf8_percent_encode(&text, URI_COMPONENT)
    )
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
