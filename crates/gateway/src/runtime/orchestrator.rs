//! Primary completion plus best-effort nag.

use std::sync::Arc;

use np_domain::config::NagVariant;
use np_domain::turn::Turn;
use np_providers::{ChatRequest, LlmProvider};
use serde::Serialize;

use super::nag::{nag_or_empty, NagGenerator};
use crate::error::ChatError;

/// What a successful chat request returns to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionResult {
    #[serde(rename = "reply")]
    pub reply_text: String,
    pub model: String,
}

/// Drives the upstream calls for one request.
///
/// Built once at startup with everything it needs; request handlers share
/// it through `AppState`.
pub struct Orchestrator {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
    nag: Arc<dyn NagGenerator>,
}

impl Orchestrator {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        model: impl Into<String>,
        temperature: f32,
        nag: Arc<dyn NagGenerator>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            nag,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn nag_variant(&self) -> NagVariant {
        self.nag.variant()
    }

    /// One primary upstream call, then the nag.
    ///
    /// A primary failure aborts with [`ChatError::Upstream`]. The nag is
    /// only attempted after the primary succeeded and can never fail the
    /// request.
    pub async fn complete(&self, transcript: Vec<Turn>) -> Result<CompletionResult, ChatError> {
        let req = ChatRequest {
            messages: transcript,
            temperature: Some(self.temperature),
            model: Some(self.model.clone()),
            ..Default::default()
        };

        let primary = self.provider.chat(&req).await?;
        tracing::debug!(
            provider = self.provider.provider_id(),
            chars = primary.content.chars().count(),
            "primary completion received"
        );

        let nag = nag_or_empty(self.nag.as_ref()).await;

        Ok(CompletionResult {
            reply_text: primary.content + &nag,
            model: self.model.clone(),
        })
    }
}
