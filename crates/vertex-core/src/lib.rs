//! vertex-core – domain logic for the Vertex Engineering Labs site backend.
//!
//! Two flows live here:
//! - [`contact`]: validation and persistence of contact-form leads.
//! - [`chat`]: the AI chat relay, WhatsApp handoff detection, and the
//!   per-visitor chat session that the presentation layer drives.
//!
//! Everything talks to hosted services over HTTP (a PostgREST database and an
//! OpenAI-compatible completion API); nothing is persisted locally.

pub mod chat;
pub mod config;
pub mod contact;
pub mod error;

pub use chat::handoff::{HandoffDetails, should_handoff, whatsapp_link};
pub use chat::relay::{CompletionBackend, HttpCompletionBackend, Relay};
pub use chat::session::ChatSession;
pub use chat::{ChatMessage, Role};
pub use config::{CompletionConfig, DatabaseConfig, HandoffConfig};
pub use contact::client::ContactFormClient;
pub use contact::store::{ContactStore, SupabaseStore};
pub use contact::{ContactForm, ContactSubmission, NewContactSubmission, validate};
pub use error::{ConfigError, RelayError, SubmitError, UpstreamError, ValidationError};
