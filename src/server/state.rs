//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::batch::BatchCoordinator;
use crate::core::events::EventBus;
use crate::storage::ResultStore;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Every field is cheap to clone; the coordinator and the bus are handles to
/// state owned elsewhere.
#[derive(Clone)]
pub struct AppState {
    /// Checker configuration (shared read-only)
    pub config: Arc<Config>,
    /// Batch admission and processing
    pub coordinator: BatchCoordinator,
    /// Live event stream
    pub bus: EventBus,
    /// Result artifacts
    pub store: Arc<dyn ResultStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        coordinator: BatchCoordinator,
        bus: EventBus,
        store: Arc<dyn ResultStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            coordinator,
            bus,
            store,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
