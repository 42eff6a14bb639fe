//! Server configuration, loaded from environment variables at startup.

use vertex_core::{CompletionConfig, DatabaseConfig, HandoffConfig};

/// Runtime configuration for vertex-server.
///
/// Listener and logging settings have defaults so the server starts without
/// any environment. Feature credentials live in the nested configs; a missing
/// one disables only that feature.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,hyper=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Value of `Access-Control-Allow-Origin` on `/api/*` (default: `"*"`).
    pub cors_allow_origin: String,

    /// Serve the OpenAPI document at `/api-docs/openapi.json`.
    pub enable_docs: bool,

    /// Contact-submission database (service credential used here).
    pub database: DatabaseConfig,

    /// Completion API used by `/api/chat`.
    pub completion: CompletionConfig,

    /// WhatsApp handoff number.
    pub handoff: HandoffConfig,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("VERTEX_BIND", "0.0.0.0:3000"),
            log_level: env_or("VERTEX_LOG", "info"),
            log_json: env_flag("VERTEX_LOG_JSON", false),
            cors_allow_origin: env_or("VERTEX_CORS_ORIGIN", "*"),
            enable_docs: env_flag("VERTEX_ENABLE_DOCS", true),
            database: DatabaseConfig::from_env(),
            completion: CompletionConfig::from_env(),
            handoff: HandoffConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".into(),
            log_level: "info".into(),
            log_json: false,
            cors_allow_origin: "*".into(),
            enable_docs: true,
            database: DatabaseConfig::default(),
            completion: CompletionConfig::default(),
            handoff: HandoffConfig::default(),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}
