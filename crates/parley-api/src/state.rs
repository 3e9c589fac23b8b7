//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use parley_chat::ChatOrchestrator;
use parley_core::ParleyConfig;
use parley_storage::ChatRepository;

/// Shared application state. All fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<ParleyConfig>,
    /// Answer pipeline.
    pub orchestrator: Arc<ChatOrchestrator>,
    /// Chat history, absent when storage is disabled or failed to open.
    pub history: Option<ChatRepository>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        config: ParleyConfig,
        orchestrator: ChatOrchestrator,
        history: Option<ChatRepository>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            history,
            start_time: Instant::now(),
        }
    }
}
