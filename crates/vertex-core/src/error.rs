//! Error taxonomy shared by both flows.
//!
//! - [`ConfigError`]: a required setting is missing. Fatal to the feature that
//!   needs it, never to the process.
//! - [`ValidationError`]: user-correctable form input; the message is safe to
//!   show verbatim.
//! - [`UpstreamError`]: the database or completion API failed. Carries detail
//!   for the logs; callers translate it into a generic message.

use thiserror::Error;

use crate::contact::{FormField, MIN_MESSAGE_WORDS};

/// A required configuration value is absent or unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing configuration: {var} is not set")]
    Missing { var: &'static str },

    #[error("invalid configuration for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Contact-form input that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingField(FormField),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Message must be at least {min} words", min = MIN_MESSAGE_WORDS)]
    MessageTooShort { words: usize },
}

/// Failure talking to a hosted service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport failure (DNS, connect, TLS, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("invalid upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors returned by [`crate::Relay::send_message`].
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("Chat failed: {0}")]
    Upstream(#[from] UpstreamError),
}

impl RelayError {
    /// Text safe to put in front of a visitor. Internal detail stays in logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            RelayError::Configuration(_) => {
                "The assistant is not available at the moment. Please use the contact form instead."
            }
            RelayError::Upstream(_) => "Connection error. Please try again.",
        }
    }
}

/// Errors returned by [`crate::ContactFormClient::submit`].
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to save submission. Please try again.")]
    Storage(#[source] UpstreamError),
}
