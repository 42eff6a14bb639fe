use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vertex_core::{ContactForm, ContactSubmission};

/// Request body for `POST /api/submit-form`.
///
/// Every field is optional on the wire so that an absent field is reported as
/// a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFormRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// At least 20 words.
    #[serde(default)]
    pub message: Option<String>,
}

impl From<SubmitFormRequest> for ContactForm {
    fn from(req: SubmitFormRequest) -> Self {
        ContactForm {
            first_name: req.first_name.unwrap_or_default(),
            last_name: req.last_name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            message: req.message.unwrap_or_default(),
        }
    }
}

/// Response body for a stored submission.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmitFormResponse {
    /// Always `true`.
    pub success: bool,
    pub message: String,
    /// Rows as stored, with `first_name` / `last_name` column names.
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<ContactSubmission>,
}
