use std::sync::Arc;

use nofly_store::ZoneStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the store and config sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The one authoritative zone collection for this process.
    pub store: Arc<ZoneStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state with a fresh store, seeded unless disabled in config.
    pub fn new(config: ServerConfig) -> Self {
        let store = if config.seed_zones {
            ZoneStore::seeded()
        } else {
            ZoneStore::new()
        };
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}
