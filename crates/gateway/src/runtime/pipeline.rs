//! The full request pipeline:
//! config check → parse → sanitize → window → augment → complete.

use np_domain::config::Config;
use np_transcript::{augment, sanitize, window, PromptPolicy};
use serde_json::Value;

use super::orchestrator::{CompletionResult, Orchestrator};
use crate::error::ChatError;

/// Per-deployment pipeline parameters derived from [`Config`].
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub max_turns: usize,
    pub policy: PromptPolicy,
    /// Env var the credential is expected in; echoed in configuration errors.
    pub credential_env: String,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_turns: config.history.max_turns,
            policy: PromptPolicy::from_config(&config.prompt),
            credential_env: config.llm.auth.env.clone(),
        }
    }
}

/// Run one chat request end to end.
///
/// `orchestrator` is `None` when no upstream credential was available at
/// startup; that is reported before the body is even parsed, so no network
/// call can happen.
pub async fn run_chat(
    orchestrator: Option<&Orchestrator>,
    settings: &PipelineSettings,
    body: &[u8],
) -> Result<CompletionResult, ChatError> {
    let orchestrator = orchestrator.ok_or_else(|| ChatError::Configuration {
        env: settings.credential_env.clone(),
    })?;

    let body: Value = serde_json::from_slice(body).map_err(|e| ChatError::Validation {
        reason: "request body must be valid JSON".into(),
        details: Some(e.to_string()),
    })?;
    let raw = body.get("messages").unwrap_or(&Value::Null);

    let transcript = sanitize(raw)?;
    let received = transcript.len();
    let transcript = window(transcript, settings.max_turns);
    let transcript = augment(transcript, &settings.policy);

    tracing::info!(
        received,
        forwarded = transcript.len(),
        model = orchestrator.model(),
        "forwarding transcript upstream"
    );

    orchestrator.complete(transcript).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::nag::DisabledNag;
    use np_domain::turn::Role;
    use np_providers::ScriptedProvider;
    use serde_json::json;
    use std::sync::Arc;

    fn settings() -> PipelineSettings {
        PipelineSettings {
            max_turns: 50,
            policy: PromptPolicy::none(),
            credential_env: "OPENAI_API_KEY".into(),
        }
    }

    fn body(v: Value) -> Vec<u8> {
        serde_json::to_vec(&v).unwrap()
    }

    #[tokio::test]
    async fn missing_orchestrator_is_a_configuration_error() {
        let err = run_chat(None, &settings(), b"not even json").await.unwrap_err();
        assert!(matches!(err, ChatError::Configuration { ref env } if env == "OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn invalid_json_is_a_validation_error() {
        let provider = Arc::new(ScriptedProvider::replying("x"));
        let orch = Orchestrator::new(provider.clone(), "m", 0.7, Arc::new(DisabledNag));
        let err = run_chat(Some(&orch), &settings(), b"{oops").await.unwrap_err();
        assert!(matches!(err, ChatError::Validation { .. }));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn window_then_augment() {
        let provider = Arc::new(ScriptedProvider::replying("ok"));
        let orch = Orchestrator::new(provider.clone(), "m", 0.7, Arc::new(DisabledNag));
        let settings = PipelineSettings {
            max_turns: 2,
            policy: PromptPolicy::with_instruction("be brief"),
            ..settings()
        };
        let messages: Vec<Value> = (0..5)
            .map(|i| json!({"role": "user", "content": format!("m{i}")}))
            .collect();

        run_chat(Some(&orch), &settings, &body(json!({ "messages": messages })))
            .await
            .unwrap();

        let sent = &provider.requests()[0].messages;
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].role(), Role::System);
        assert_eq!(sent[0].content(), "be brief");
        assert_eq!(sent[1].content(), "m3");
        assert_eq!(sent[2].content(), "m4");
    }
}
