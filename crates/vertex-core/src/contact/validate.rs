use std::sync::LazyLock;

use regex::Regex;

use super::{ContactForm, FormField, NewContactSubmission};
use crate::error::ValidationError;

/// Minimum number of whitespace-separated words in a message.
pub const MIN_MESSAGE_WORDS: usize = 20;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Validate a contact form.
///
/// Checks run in order: every field present, then the email shape, then the
/// message length. The first failure is returned.
pub fn validate(form: &ContactForm) -> Result<NewContactSubmission, ValidationError> {
    let fields = [
        (FormField::FirstName, &form.first_name),
        (FormField::LastName, &form.last_name),
        (FormField::Email, &form.email),
        (FormField::Message, &form.message),
    ];
    if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
        return Err(ValidationError::MissingField(*field));
    }

    if !is_valid_email(&form.email) {
        return Err(ValidationError::InvalidEmail);
    }

    let words = word_count(&form.message);
    if words < MIN_MESSAGE_WORDS {
        return Err(ValidationError::MessageTooShort { words });
    }

    Ok(NewContactSubmission {
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        email: form.email.clone(),
        message: form.message.clone(),
    })
}

/// `local@domain.tld`, no whitespace and exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn word_count(message: &str) -> usize {
    message.split_whitespace().count()
}
