use std::sync::Arc;
use tubedrop_core::{Config, DownloadOrchestrator};

/// Shared application state
pub struct AppState {
    config: Config,
    orchestrator: Arc<DownloadOrchestrator>,
}

impl AppState {
    pub fn new(config: Config, orchestrator: Arc<DownloadOrchestrator>) -> Self {
        Self {
            config,
            orchestrator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn orchestrator(&self) -> &DownloadOrchestrator {
        self.orchestrator.as_ref()
    }
}
