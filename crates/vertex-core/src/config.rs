//! Feature configuration, loaded from environment variables at startup.
//!
//! Credentials are optional at load time. A missing credential only disables
//! the feature that needs it, and surfaces as a [`ConfigError`] when that
//! feature is used.

use std::fmt;

use crate::contact::store::{Credential, SupabaseStore};
use crate::error::ConfigError;

pub const ENV_DATABASE_URL: &str = "VERTEX_DATABASE_URL";
pub const ENV_DATABASE_SERVICE_KEY: &str = "VERTEX_DATABASE_SERVICE_KEY";
pub const ENV_DATABASE_ANON_KEY: &str = "VERTEX_DATABASE_ANON_KEY";
pub const ENV_COMPLETION_API_KEY: &str = "VERTEX_COMPLETION_API_KEY";
pub const ENV_COMPLETION_API_URL: &str = "VERTEX_COMPLETION_API_URL";
pub const ENV_WHATSAPP_NUMBER: &str = "VERTEX_WHATSAPP_NUMBER";

/// Base URL of the OpenAI-compatible completion API.
pub const DEFAULT_COMPLETION_API_URL: &str = "https://api.groq.com/openai/v1";

// ── Completion API ───────────────────────────────────────────────────────────

/// Settings for the chat relay's completion API.
#[derive(Clone)]
pub struct CompletionConfig {
    /// Bearer credential. `None` disables the chat feature.
    pub api_key: Option<String>,
    /// Base URL; `/chat/completions` is appended.
    pub api_url: String,
}

impl CompletionConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env_opt(ENV_COMPLETION_API_KEY),
            api_url: env_or(ENV_COMPLETION_API_URL, DEFAULT_COMPLETION_API_URL),
        }
    }

    /// The credential, or a configuration error naming the variable to set.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::Missing {
            var: ENV_COMPLETION_API_KEY,
        })
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_COMPLETION_API_URL.to_owned(),
        }
    }
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .finish()
    }
}

// ── Database ─────────────────────────────────────────────────────────────────

/// Settings for the hosted contact-submission database.
#[derive(Clone, Default)]
pub struct DatabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: Option<String>,
    /// Elevated credential. Server-side only.
    pub service_key: Option<String>,
    /// Low-privilege credential, safe to hand to browsers.
    pub anon_key: Option<String>,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env_opt(ENV_DATABASE_URL),
            service_key: env_opt(ENV_DATABASE_SERVICE_KEY),
            anon_key: env_opt(ENV_DATABASE_ANON_KEY),
        }
    }

    /// Store authenticated with the service credential (server path).
    pub fn service_store(&self) -> Result<SupabaseStore, ConfigError> {
        let url = self.url()?;
        let key = self.service_key.as_deref().ok_or(ConfigError::Missing {
            var: ENV_DATABASE_SERVICE_KEY,
        })?;
        Ok(SupabaseStore::new(url, Credential::Service(key.to_owned())))
    }

    /// Store authenticated with the anonymous credential (client path).
    pub fn anon_store(&self) -> Result<SupabaseStore, ConfigError> {
        let url = self.url()?;
        let key = self.anon_key.as_deref().ok_or(ConfigError::Missing {
            var: ENV_DATABASE_ANON_KEY,
        })?;
        Ok(SupabaseStore::new(url, Credential::Anon(key.to_owned())))
    }

    fn url(&self) -> Result<&str, ConfigError> {
        let url = self
            .url
            .as_deref()
            .ok_or(ConfigError::Missing { var: ENV_DATABASE_URL })?;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                var: ENV_DATABASE_URL,
                reason: "expected an http(s) URL".into(),
            });
        }
        Ok(url)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("service_key", &redact(&self.service_key))
            .field("anon_key", &redact(&self.anon_key))
            .finish()
    }
}

// ── Handoff ──────────────────────────────────────────────────────────────────

/// Messaging handoff settings.
#[derive(Debug, Clone, Default)]
pub struct HandoffConfig {
    /// International number, digits only (e.g. `"15551234567"`).
    pub whatsapp_number: Option<String>,
}

impl HandoffConfig {
    pub fn from_env() -> Self {
        Self {
            whatsapp_number: env_opt(ENV_WHATSAPP_NUMBER).and_then(|raw| {
                let normalized = normalize_number(&raw);
                if normalized.is_none() {
                    tracing::warn!(
                        var = ENV_WHATSAPP_NUMBER,
                        "contact number has no digits; WhatsApp handoff disabled"
                    );
                }
                normalized
            }),
        }
    }
}

/// Strip `+`, spaces, and punctuation so the number can go into a `wa.me` URL.
pub fn normalize_number(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then_some(digits)
}

// ── private helpers ──────────────────────────────────────────────────────────

/// Unset and empty variables are both treated as absent.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_owned())
}

fn redact(value: &Option<String>) -> &'static str {
    match value {
        Some(_) => "<set>",
        None => "<unset>",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_completion_key_names_the_variable() {
        let cfg = CompletionConfig::default();
        assert_eq!(
            cfg.api_key(),
            Err(ConfigError::Missing { var: ENV_COMPLETION_API_KEY })
        );
    }

    #[test]
    fn service_store_requires_url_and_key() {
        let cfg = DatabaseConfig {
            url: None,
            service_key: Some("svc".into()),
            anon_key: None,
        };
        assert_eq!(
            cfg.service_store().unwrap_err(),
            ConfigError::Missing { var: ENV_DATABASE_URL }
        );

        let cfg = DatabaseConfig {
            url: Some("https://db.example.test".into()),
            ..Default::default()
        };
        assert_eq!(
            cfg.service_store().unwrap_err(),
            ConfigError::Missing { var: ENV_DATABASE_SERVICE_KEY }
        );
        assert_eq!(
            cfg.anon_store().unwrap_err(),
            ConfigError::Missing { var: ENV_DATABASE_ANON_KEY }
        );
    }

    #[test]
    fn non_http_database_url_is_rejected() {
        let cfg = DatabaseConfig {
            url: Some("postgres://db".into()),
            service_key: Some("svc".into()),
            anon_key: None,
        };
        assert!(matches!(
            cfg.service_store(),
            Err(ConfigError::Invalid { var: ENV_DATABASE_URL, .. })
        ));
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let cfg = DatabaseConfig {
            url: Some("https://db.example.test".into()),
            service_key: Some("super-secret".into()),
            anon_key: Some("also-secret".into()),
        };
        let out = format!("{cfg:?}");
        assert!(!out.contains("secret"));
        assert!(out.contains("<set>"));

        let out = format!(
            "{:?}",
            CompletionConfig {
                api_key: Some("gsk_live".into()),
                ..Default::default()
            }
        );
        assert!(!out.contains("gsk_live"));
    }

    #[test]
    fn number_normalization_keeps_digits_only() {
        assert_eq!(normalize_number("+1 (555) 123-4567").as_deref(), Some("15551234567"));
        assert_eq!(normalize_number("n/a"), None);
    }
}
