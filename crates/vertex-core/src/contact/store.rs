//! Persistence of contact submissions.
//!
//! [`ContactStore`] is the seam; [`SupabaseStore`] is the only implementation
//! and writes through the hosted database's PostgREST interface
//! (`POST {url}/rest/v1/<table>`).
//!
//! Trait methods use `impl Future` in their signatures so no `async-trait`
//! crate is required.

use std::fmt;
use std::future::Future;

use reqwest::Client;
use tracing::debug;

use super::{CONTACT_TABLE, ContactSubmission, NewContactSubmission};
use crate::error::UpstreamError;

/// Inserts validated submissions into the hosted database.
pub trait ContactStore: Send + Sync + 'static {
    /// Insert one row. Returns the stored rows when the credential is allowed
    /// to read them back, otherwise an empty list.
    fn insert(
        &self,
        row: NewContactSubmission,
    ) -> impl Future<Output = Result<Vec<ContactSubmission>, UpstreamError>> + Send;
}

/// Database credential, tagged with its privilege level.
#[derive(Clone)]
pub enum Credential {
    /// Elevated key. Never leaves the server.
    Service(String),
    /// Row-level-security restricted key; may insert but not read back.
    Anon(String),
}

impl Credential {
    fn key(&self) -> &str {
        match self {
            Credential::Service(k) | Credential::Anon(k) => k,
        }
    }

    /// PostgREST `Prefer` header: only the service role reads rows back.
    fn prefer(&self) -> &'static str {
        match self {
            Credential::Service(_) => "return=representation",
            Credential::Anon(_) => "return=minimal",
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Service(_) => f.write_str("Service(<redacted>)"),
            Credential::Anon(_) => f.write_str("Anon(<redacted>)"),
        }
    }
}

/// PostgREST-backed contact store.
#[derive(Clone, Debug)]
pub struct SupabaseStore {
    endpoint: String,
    credential: Credential,
    client: Client,
}

impl SupabaseStore {
    /// `url` is the project base URL, e.g. `"https://xyz.supabase.co"`.
    pub fn new(url: &str, credential: Credential) -> Self {
        let client = Client::builder()
            .user_agent(concat!("vertex-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self {
            endpoint: format!("{}/rest/v1/{}", url.trim_end_matches('/'), CONTACT_TABLE),
            credential,
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ContactStore for SupabaseStore {
    async fn insert(
        &self,
        row: NewContactSubmission,
    ) -> Result<Vec<ContactSubmission>, UpstreamError> {
        let key = self.credential.key();
        let resp = self
            .client
            .post(&self.endpoint)
            .header("apikey", key)
            .bearer_auth(key)
            .header("Prefer", self.credential.prefer())
            .json(&[row])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: postgrest_message(&body),
            });
        }

        debug!(status = status.as_u16(), "contact submission stored");
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// PostgREST errors look like `{"code":..,"message":..,"details":..}`.
fn postgrest_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or_else(|| body.chars().take(200).collect())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn endpoint_targets_the_submissions_table() {
        let store = SupabaseStore::new("https://db.example.test/", Credential::Anon("k".into()));
        assert_eq!(
            store.endpoint(),
            "https://db.example.test/rest/v1/contact_submissions"
        );
    }

    #[test]
    fn only_the_service_role_reads_rows_back() {
        assert_eq!(Credential::Service("k".into()).prefer(), "return=representation");
        assert_eq!(Credential::Anon("k".into()).prefer(), "return=minimal");
    }

    #[test]
    fn credentials_are_redacted_in_debug_output() {
        let store = SupabaseStore::new("https://db.example.test", Credential::Service("sk-123".into()));
        assert!(!format!("{store:?}").contains("sk-123"));
    }

    #[test]
    fn postgrest_error_message_is_extracted() {
        let body = r#"{"code":"42501","message":"new row violates row-level security policy","details":null}"#;
        assert_eq!(
            postgrest_message(body),
            "new row violates row-level security policy"
        );
        assert_eq!(postgrest_message("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn new_rows_use_column_names() {
        let row = NewContactSubmission {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.org".into(),
            message: "hello".into(),
        };
        let json = serde_json::to_value([row]).unwrap();
        assert_eq!(json[0]["first_name"], "Ada");
        assert_eq!(json[0]["last_name"], "Lovelace");
        assert!(json[0].get("firstName").is_none());
    }
}
