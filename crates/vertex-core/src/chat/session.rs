//! Per-visitor chat session.
//!
//! Owns the transcript and the UI flags the widget renders from. Mutation goes
//! through [`ChatSession::append_message`] and
//! [`ChatSession::recompute_handoff`]; [`ChatSession::send`] strings them
//! together around one relay call.

use tracing::warn;

use super::handoff::{HandoffDetails, should_handoff, whatsapp_link};
use super::relay::{CompletionBackend, Relay};
use super::ChatMessage;

pub const GREETING: &str = "👋 Hi! I'm the Vertex Engineering Architect. I can help you understand our CAD, CFD, FEA, and prototyping services. What brings you here today?";

/// A canned opener offered before the visitor types anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickReply {
    pub label: &'static str,
    pub message: &'static str,
}

pub const QUICK_REPLIES: [QuickReply; 4] = [
    QuickReply {
        label: "Services Overview",
        message: "What services do you offer?",
    },
    QuickReply {
        label: "Pricing & Timeline",
        message: "How much does it cost and how long does it take?",
    },
    QuickReply {
        label: "Portfolio Examples",
        message: "Can you show me some example projects?",
    },
    QuickReply {
        label: "Get Started",
        message: "How do I get started with a project?",
    },
];

#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    handoff: bool,
    quick_replies_dismissed: bool,
    details: HandoffDetails,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// A fresh session holding only the assistant greeting.
    pub fn new() -> Self {
        Self {
            transcript: vec![ChatMessage::assistant(GREETING)],
            handoff: false,
            quick_replies_dismissed: false,
            details: HandoffDetails::default(),
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn append_message(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }

    /// Raise the handoff flag if the latest user message asks for it.
    ///
    /// The flag is sticky: once raised it stays up for the whole session.
    pub fn recompute_handoff(&mut self) -> bool {
        self.handoff |= should_handoff(&self.transcript);
        self.handoff
    }

    pub fn handoff(&self) -> bool {
        self.handoff
    }

    /// Quick replies show only until the first message is sent.
    pub fn quick_replies(&self) -> &'static [QuickReply] {
        if !self.quick_replies_dismissed && self.transcript.len() == 1 {
            &QUICK_REPLIES
        } else {
            &[]
        }
    }

    pub fn set_handoff_details(&mut self, details: HandoffDetails) {
        self.details = details;
    }

    /// WhatsApp link carrying whatever name/email the visitor gave.
    pub fn handoff_link(&self, number: &str) -> String {
        whatsapp_link(number, &self.details)
    }

    /// Send one visitor message and append the assistant's answer.
    ///
    /// Blank input is ignored and returns `None`. Relay failures are logged
    /// and rendered into the transcript as a short, retry-able notice. The
    /// relay receives the transcript as it stood before this message.
    pub async fn send<B: CompletionBackend>(
        &mut self,
        relay: &Relay<B>,
        text: &str,
    ) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let history = self.transcript.clone();
        self.append_message(ChatMessage::user(text));
        self.quick_replies_dismissed = true;
        self.recompute_handoff();

        let reply = match relay.send_message(text, &history).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "chat message could not be answered");
                e.user_message().to_owned()
            }
        };
        self.append_message(ChatMessage::assistant(reply));
        self.recompute_handoff();
        self.transcript.last()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chat::Role;
    use crate::chat::relay::test::ScriptedBackend;

    fn relay(backend: ScriptedBackend) -> Relay<ScriptedBackend> {
        Relay::with_backend(backend, Some("k".into()), None)
    }

    #[test]
    fn new_session_greets_and_offers_quick_replies() {
        let session = ChatSession::new();
        assert_eq!(session.transcript(), &[ChatMessage::assistant(GREETING)]);
        assert_eq!(session.quick_replies().len(), 4);
        assert!(!session.handoff());
    }

    #[tokio::test]
    async fn send_appends_user_and_reply_and_passes_prior_history() {
        let relay = relay(ScriptedBackend::replying("We do CFD and FEA."));
        let mut session = ChatSession::new();

        let reply = session.send(&relay, "  What services do you offer?  ").await;
        assert_eq!(reply.map(|m| m.content.as_str()), Some("We do CFD and FEA."));

        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.transcript()[1], ChatMessage::user("What services do you offer?"));
        assert!(session.quick_replies().is_empty());

        let requests = relay.backend().requests.lock().unwrap();
        // instructions + greeting + new message
        assert_eq!(requests[0].messages.len(), 3);
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let relay = relay(ScriptedBackend::replying("x"));
        let mut session = ChatSession::new();
        assert!(session.send(&relay, "   ").await.is_none());
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(relay.backend().calls(), 0);
    }

    #[tokio::test]
    async fn whatsapp_request_raises_handoff_regardless_of_reply() {
        let relay = relay(ScriptedBackend::replying("Happy to help with FEA."));
        let mut session = ChatSession::new();

        session.send(&relay, "can I get your whatsapp").await;
        assert!(session.handoff());
    }

    #[tokio::test]
    async fn handoff_is_sticky_across_later_messages() {
        let relay = relay(ScriptedBackend::replying("Sure."));
        let mut session = ChatSession::new();

        session.send(&relay, "I'd like to talk to an engineer").await;
        assert!(session.handoff());

        session.send(&relay, "What file formats do you accept?").await;
        assert!(!should_handoff(session.transcript()));
        assert!(session.handoff());
    }

    #[tokio::test]
    async fn relay_failure_becomes_a_generic_notice() {
        let relay = relay(ScriptedBackend::failing());
        let mut session = ChatSession::new();

        let reply = session.send(&relay, "hello").await.cloned().unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "Connection error. Please try again.");
        assert!(!reply.content.contains("429"));
    }

    #[tokio::test]
    async fn unconfigured_relay_is_reported_without_calling_out() {
        let relay = Relay::with_backend(ScriptedBackend::replying("x"), None, None);
        let mut session = ChatSession::new();

        let reply = session.send(&relay, "hello").await.cloned().unwrap();
        assert!(reply.content.contains("not available"));
        assert_eq!(relay.backend().calls(), 0);
    }

    #[test]
    fn handoff_link_uses_session_details() {
        let mut session = ChatSession::new();
        session.set_handoff_details(HandoffDetails::new("Ada", ""));
        assert!(session.handoff_link("15551234567").ends_with("Name%3A%20Ada"));
    }
}
