use std::sync::Arc;

use stockroom_db::Store;

use crate::config::ServerConfig;
use crate::mode::ResponseMode;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend, injected at startup.
    pub store: Arc<dyn Store>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn mode(&self) -> ResponseMode {
        self.config.response_mode
    }
}
