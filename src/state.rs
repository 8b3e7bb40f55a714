//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;

/// Read-only state cloned into every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Name reported in the health payload.
    pub fn service_name(&self) -> &str {
        &self.config.service.name
    }
}
