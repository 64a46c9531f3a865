//! Shared application state.

use std::sync::Arc;

use cafe_db::Database;

use crate::config::ServerConfig;
use crate::session::SessionStore;

/// State handed to every handler through axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub sessions: SessionStore,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Builds the state, sizing session expiry from the configuration.
    pub fn new(db: Database, config: ServerConfig) -> Self {
        AppState {
            db,
            sessions: SessionStore::new(config.session_ttl()),
            config: Arc::new(config),
        }
    }
}
