//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use tracing::warn;
use vertex_core::{ConfigError, Relay, SupabaseStore};

use crate::config::Config;

/// State shared across all HTTP handlers. Immutable after startup.
#[derive(Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Service-credential contact store, or why it is unavailable.
    pub contacts: Result<SupabaseStore, ConfigError>,
    /// Completion relay; reports a configuration error itself when the
    /// credential is missing.
    pub relay: Relay,
}

impl AppState {
    /// Resolve every feature from `config` once.
    pub fn from_config(config: Config) -> Self {
        let contacts = config.database.service_store();
        if let Err(e) = &contacts {
            warn!(error = %e, "contact form storage disabled");
        }

        let relay = Relay::from_config(
            &config.completion,
            config.handoff.whatsapp_number.as_deref(),
        );
        if !relay.is_configured() {
            warn!("completion API key not set; /api/chat will answer with a configuration error");
        }

        Self {
            config: Arc::new(config),
            contacts,
            relay,
        }
    }
}
