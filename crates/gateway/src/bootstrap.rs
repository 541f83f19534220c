//! Startup wiring: credential, upstream client, nag generator.

use std::sync::Arc;

use anyhow::Context;
use np_domain::config::Config;
use np_providers::util::resolve_api_key;
use np_providers::{LlmProvider, OpenAiCompatProvider};

use crate::runtime::nag::build_nag_generator;
use crate::runtime::random::{RandomSource, ThreadRandom};
use crate::runtime::{Orchestrator, PipelineSettings};
use crate::state::AppState;

/// Build the application state from config and the process environment.
///
/// A missing credential is not fatal here: the server still boots and
/// `/api/chat` answers 500 until the key is provided.
pub fn build_app_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    let provider: Option<Arc<dyn LlmProvider>> = match resolve_api_key(&config.llm.auth) {
        Ok(key) => {
            let provider = OpenAiCompatProvider::from_config(&config.llm, key)
                .context("building upstream HTTP client")?;
            tracing::info!(
                base_url = %config.llm.base_url,
                model = %config.llm.model,
                "upstream completion service configured"
            );
            Some(Arc::new(provider) as Arc<dyn LlmProvider>)
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                "upstream credential missing; chat requests will fail until it is set"
            );
            None
        }
    };

    Ok(build_app_state_with(config, provider, Arc::new(ThreadRandom)))
}

/// Assemble state around an explicit provider and random source.
pub fn build_app_state_with(
    config: Arc<Config>,
    provider: Option<Arc<dyn LlmProvider>>,
    rng: Arc<dyn RandomSource>,
) -> AppState {
    let orchestrator = provider.map(|provider| {
        let nag = build_nag_generator(&config.nag, provider.clone(), &config.llm.model, rng);
        Arc::new(Orchestrator::new(
            provider,
            config.llm.model.clone(),
            config.llm.temperature,
            nag,
        ))
    });

    AppState {
        settings: Arc::new(PipelineSettings::from_config(&config)),
        orchestrator,
        config,
    }
}
