//! In-process provider that replays canned outcomes.
//!
//! Used by tests and by `nagproxy run --dry-run` to exercise the pipeline
//! without network access. Every request is recorded for inspection.

use std::collections::VecDeque;

use np_domain::error::{Error, Result};
use parking_lot::Mutex;

use crate::traits::{ChatRequest, ChatResponse, LlmProvider};

/// A canned outcome for one `chat` call.
#[derive(Debug, Clone)]
pub enum Scripted {
    Reply(String),
    Fail { status: Option<u16>, message: String },
}

pub struct ScriptedProvider {
    outcomes: Mutex<VecDeque<Scripted>>,
    fallback: Scripted,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    /// Replay `outcomes` in order; once exhausted, every call gets `fallback`.
    pub fn new(outcomes: Vec<Scripted>, fallback: Scripted) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(Vec::new(), Scripted::Reply(text.into()))
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait::async_trait]
impl LlmProvider for ScriptedProvider {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
        self.requests.lock().push(req.clone());
        let outcome = self
            .outcomes
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match outcome {
            Scripted::Reply(content) => Ok(ChatResponse {
                content,
                usage: None,
                model: req.model.clone().unwrap_or_else(|| "scripted".into()),
                finish_reason: Some("stop".into()),
            }),
            Scripted::Fail { status, message } => Err(Error::Upstream {
                provider: "scripted".into(),
                status,
                message,
            }),
        }
    }

    fn provider_id(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use np_domain::turn::Turn;

    fn req() -> ChatRequest {
        ChatRequest {
            messages: vec![Turn::user("hi").unwrap()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn replays_then_falls_back() {
        let p = ScriptedProvider::new(
            vec![Scripted::Reply("first".into())],
            Scripted::Fail {
                status: Some(500),
                message: "done".into(),
            },
        );
        assert_eq!(p.chat(&req()).await.unwrap().content, "first");
        let err = p.chat(&req()).await.unwrap_err();
        assert!(matches!(err, Error::Upstream { status: Some(500), .. }));
        assert_eq!(p.call_count(), 2);
    }
}
