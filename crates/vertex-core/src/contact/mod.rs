//! Contact-form leads.
//!
//! [`validate`] is the single routine both entry points run: the server
//! handler (service credential) and [`client::ContactFormClient`] (anonymous
//! credential). A successful validation yields the row to insert.

pub mod client;
pub mod store;
mod validate;

use serde::{Deserialize, Serialize};
use strum::Display;

pub use validate::{MIN_MESSAGE_WORDS, is_valid_email, validate, word_count};

/// Table the submissions are written to.
pub const CONTACT_TABLE: &str = "contact_submissions";

/// Raw form input as posted by the site. Absent fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

/// The four form fields, used to report which one was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "camelCase")]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Message,
}

/// A validated submission, serialized with the table's column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

/// A row as echoed back by the database.
///
/// `id` and `created_at` are assigned by the database; their exact types are
/// its business, so they are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}
