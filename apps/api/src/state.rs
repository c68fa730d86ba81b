use std::sync::Arc;

use crate::coach::orchestrator::Orchestrator;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Responder chain for interview turns. Immutable after startup.
    pub orchestrator: Arc<Orchestrator>,
}
