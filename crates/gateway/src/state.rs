use std::sync::Arc;

use np_domain::config::Config;

use crate::runtime::{Orchestrator, PipelineSettings};

/// Shared application state passed to all API handlers.
///
/// Everything here is built once at startup and read-only afterwards;
/// requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when the upstream credential could not be resolved. Chat
    /// requests then fail with a configuration error.
    pub orchestrator: Option<Arc<Orchestrator>>,
    pub settings: Arc<PipelineSettings>,
}
