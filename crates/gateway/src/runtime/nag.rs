//! Nag message generation.
//!
//! One [`NagGenerator`] is chosen per deployment by [`build_nag_generator`]
//! from which `[nag]` lists are configured. The orchestrator only ever sees
//! the trait object.

use std::sync::Arc;

use np_domain::config::{NagConfig, NagVariant};
use np_domain::turn::Turn;
use np_providers::{ChatRequest, LlmProvider};

use super::random::RandomSource;

/// Failure while producing a nag message.
///
/// Never surfaced to clients: [`nag_or_empty`] turns it into an empty
/// string after logging it.
#[derive(Debug, thiserror::Error)]
pub enum NagError {
    #[error("nag completion failed: {0}")]
    Upstream(#[from] np_domain::error::Error),
}

#[async_trait::async_trait]
pub trait NagGenerator: Send + Sync {
    /// Produce the text to append to the primary reply, separator included.
    /// An empty string means "no nag this time".
    async fn generate(&self) -> Result<String, NagError>;

    fn variant(&self) -> NagVariant;
}

/// Run `generator`, collapsing any failure into an empty message.
///
/// This is the only place nag errors are handled and they stop here: the
/// primary reply is returned regardless.
pub async fn nag_or_empty(generator: &dyn NagGenerator) -> String {
    match generator.generate().await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                variant = ?generator.variant(),
                error = %e,
                "nag generation failed, replying without it"
            );
            String::new()
        }
    }
}

/// Pick the generator for this deployment.
pub fn build_nag_generator(
    cfg: &NagConfig,
    provider: Arc<dyn LlmProvider>,
    model: &str,
    rng: Arc<dyn RandomSource>,
) -> Arc<dyn NagGenerator> {
    let variant = cfg.variant();
    tracing::info!(?variant, "nag generator selected");

    match variant {
        NagVariant::Dynamic => Arc::new(DynamicNag {
            provider,
            model: model.to_string(),
            items: cfg.luxury_items.clone().unwrap_or_default(),
            separator: cfg.separator_for(variant),
            config: cfg.clone(),
            rng,
        }),
        NagVariant::Static => Arc::new(StaticNag {
            items: cfg.want_items.clone().unwrap_or_default(),
            people: cfg.person_names.clone().unwrap_or_default(),
            separator: cfg.separator_for(variant),
            config: cfg.clone(),
            rng,
        }),
        NagVariant::Disabled => Arc::new(DisabledNag),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Dynamic: second upstream call
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct DynamicNag {
    provider: Arc<dyn LlmProvider>,
    model: String,
    items: Vec<String>,
    separator: String,
    config: NagConfig,
    rng: Arc<dyn RandomSource>,
}

impl DynamicNag {
    fn pitch_request(&self, item: &str) -> ChatRequest {
        let messages = [
            Turn::system(self.config.persona_prompt.as_str()),
            Turn::user(self.config.render_pitch_prompt(item)),
        ]
        .into_iter()
        .flatten()
        .collect();

        ChatRequest {
            messages,
            temperature: Some(self.config.temperature),
            model: Some(self.model.clone()),
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl NagGenerator for DynamicNag {
    async fn generate(&self) -> Result<String, NagError> {
        if self.items.is_empty() {
            return Ok(String::new());
        }
        let item = &self.items[self.rng.pick(self.items.len())];
        tracing::debug!(item = %item, "generating dynamic nag");

        let resp = self.provider.chat(&self.pitch_request(item)).await?;
        if resp.content.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{}{}", self.separator, resp.content))
    }

    fn variant(&self) -> NagVariant {
        NagVariant::Dynamic
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Static: template fill
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct StaticNag {
    items: Vec<String>,
    people: Vec<String>,
    separator: String,
    config: NagConfig,
    rng: Arc<dyn RandomSource>,
}

#[async_trait::async_trait]
impl NagGenerator for StaticNag {
    async fn generate(&self) -> Result<String, NagError> {
        if self.items.is_empty() || self.people.is_empty() {
            return Ok(String::new());
        }
        let item = &self.items[self.rng.pick(self.items.len())];
        let person = &self.people[self.rng.pick(self.people.len())];
        Ok(format!(
            "{}{}",
            self.separator,
            self.config.render_template(person, item)
        ))
    }

    fn variant(&self) -> NagVariant {
        NagVariant::Static
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Disabled
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct DisabledNag;

#[async_trait::async_trait]
impl NagGenerator for DisabledNag {
    async fn generate(&self) -> Result<String, NagError> {
        Ok(String::new())
    }

    fn variant(&self) -> NagVariant {
        NagVariant::Disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::random::SequenceRandom;
    use np_domain::turn::Role;
    use np_providers::{Scripted, ScriptedProvider};

    fn fixed(picks: Vec<usize>) -> Arc<dyn RandomSource> {
        Arc::new(SequenceRandom::new(picks))
    }

    fn static_config() -> NagConfig {
        NagConfig {
            want_items: Some(vec!["a bag".into(), "new shoes".into()]),
            person_names: Some(vec!["Aki".into(), "Mina".into()]),
            template: "{person}, please buy me {item}!".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn static_fills_template_from_picks() {
        let provider = Arc::new(ScriptedProvider::replying("unused"));
        let nag = build_nag_generator(&static_config(), provider.clone(), "m", fixed(vec![1, 0]));
        assert_eq!(nag.variant(), NagVariant::Static);

        let text = nag.generate().await.unwrap();
        assert_eq!(text, "\n\nAki, please buy me new shoes!");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn static_with_empty_list_is_silent() {
        let cfg = NagConfig {
            person_names: Some(vec![]),
            ..static_config()
        };
        let provider = Arc::new(ScriptedProvider::replying("unused"));
        let nag = build_nag_generator(&cfg, provider, "m", fixed(vec![0]));
        assert_eq!(nag.generate().await.unwrap(), "");
    }

    #[tokio::test]
    async fn dynamic_calls_upstream_with_persona_and_item() {
        let cfg = NagConfig {
            luxury_items: Some(vec!["a watch".into(), "a yacht".into()]),
            ..Default::default()
        };
        let provider = Arc::new(ScriptedProvider::replying("ちなみにさ、ヨットが欲しい"));
        let nag = build_nag_generator(&cfg, provider.clone(), "gpt-4o-mini", fixed(vec![1]));

        let text = nag.generate().await.unwrap();
        assert_eq!(text, "\n  ちなみにさ、ヨットが欲しい");

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(req.temperature, Some(0.8));
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role(), Role::System);
        assert_eq!(req.messages[1].role(), Role::User);
        assert!(req.messages[1].content().contains("a yacht"));
        assert!(req.messages[1].content().contains("ちなみにさ、"));
    }

    #[tokio::test]
    async fn dynamic_with_empty_list_skips_the_call() {
        let cfg = NagConfig {
            luxury_items: Some(vec![]),
            ..Default::default()
        };
        let provider = Arc::new(ScriptedProvider::replying("unused"));
        let nag = build_nag_generator(&cfg, provider.clone(), "m", fixed(vec![0]));
        assert_eq!(nag.generate().await.unwrap(), "");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn dynamic_empty_completion_yields_nothing() {
        let cfg = NagConfig {
            luxury_items: Some(vec!["a watch".into()]),
            ..Default::default()
        };
        let provider = Arc::new(ScriptedProvider::replying(""));
        let nag = build_nag_generator(&cfg, provider, "m", fixed(vec![0]));
        assert_eq!(nag.generate().await.unwrap(), "");
    }

    #[tokio::test]
    async fn failures_collapse_to_empty() {
        let cfg = NagConfig {
            luxury_items: Some(vec!["a watch".into()]),
            ..Default::default()
        };
        let provider = Arc::new(ScriptedProvider::new(
            vec![],
            Scripted::Fail {
                status: Some(500),
                message: "boom".into(),
            },
        ));
        let nag = build_nag_generator(&cfg, provider, "m", fixed(vec![0]));
        assert!(nag.generate().await.is_err());
        assert_eq!(nag_or_empty(nag.as_ref()).await, "");
    }

    #[tokio::test]
    async fn disabled_is_always_empty() {
        let provider = Arc::new(ScriptedProvider::replying("unused"));
        let nag = build_nag_generator(&NagConfig::default(), provider, "m", fixed(vec![]));
        assert_eq!(nag.variant(), NagVariant::Disabled);
        assert_eq!(nag_or_empty(nag.as_ref()).await, "");
    }
}
