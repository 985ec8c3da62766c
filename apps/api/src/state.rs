use std::sync::Arc;

use crate::config::Config;
use crate::mediation::Mediator;
use crate::studio::Studio;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// One-shot facade over the shared model gateway.
    pub mediator: Mediator,
    /// Per-view request lifecycles. One instance for the whole process.
    pub studio: Arc<Studio>,
    pub config: Config,
}

impl AppState {
    pub fn new(mediator: Mediator, config: Config) -> Self {
        Self {
            studio: Arc::new(Studio::new(mediator.clone())),
            mediator,
            config,
        }
    }
}
