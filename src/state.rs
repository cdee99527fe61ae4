//! Shared application state for request handlers.

use crate::config::AppConfig;
use crate::export::ExportStore;

/// Shared application state, cloned into each handler.
///
/// Each request reads the export independently, so there is no shared mutable
/// state here.
#[derive(Clone)]
pub struct AppState {
    pub exports: ExportStore,
}

impl AppState {
    /// Creates the application state from the loaded configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            exports: ExportStore::new(config.export.path.clone()),
        }
    }
}
