//! OpenAI-compatible adapter.
//!
//! Works with OpenAI and any other endpoint that follows the OpenAI chat
//! completions contract (`POST {base_url}/chat/completions`).

use crate::traits::{ChatRequest, ChatResponse, LlmProvider, Usage};
use crate::util::from_reqwest;
use np_domain::config::LlmConfig;
use np_domain::error::{Error, Result};
use np_domain::turn::Turn;
use serde_json::Value;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Adapter struct
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// An LLM provider adapter for any OpenAI-compatible API endpoint.
pub struct OpenAiCompatProvider {
    id: String,
    base_url: String,
    api_key: String,
    default_model: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new provider from the `[llm]` config and a resolved key.
    ///
    /// The HTTP client is built once here and shared by every request.
    pub fn from_config(cfg: &LlmConfig, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(from_reqwest)?;

        Ok(Self {
            id: "openai".into(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key,
            default_model: cfg.model.clone(),
            client,
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Resolve the effective model name for this request.
    fn effective_model(&self, req: &ChatRequest) -> String {
        req.model
            .clone()
            .unwrap_or_else(|| self.default_model.clone())
    }

    fn build_chat_body(&self, req: &ChatRequest) -> Value {
        let messages: Vec<Value> = req.messages.iter().map(turn_to_openai).collect();

        let mut body = serde_json::json!({
            "model": self.effective_model(req),
            "messages": messages,
        });

        if let Some(temp) = req.temperature {
            body["temperature"] = serde_json::json!(temp);
        }
        body
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Message serialization helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn turn_to_openai(turn: &Turn) -> Value {
    serde_json::json!({
        "role": turn.role().as_str(),
        "content": turn.content(),
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Response deserialization helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Extract the first choice. A missing choice or a `null` content is not an
/// error: the reply is simply empty.
fn parse_chat_response(body: &Value) -> ChatResponse {
    let choice = body
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|a| a.first());

    let content = choice
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    let finish_reason = choice
        .and_then(|c| c.get("finish_reason"))
        .and_then(|v| v.as_str())
        .map(String::from);

    let model = body
        .get("model")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string();

    let usage = body.get("usage").and_then(parse_openai_usage);

    ChatResponse {
        content,
        usage,
        model,
        finish_reason,
    }
}

/// Token counts that are missing or do not fit a `u32` drop the whole
/// usage block.
fn parse_openai_usage(v: &Value) -> Option<Usage> {
    let count = |key: &str| u32::try_from(v.get(key)?.as_u64()?).ok();
    Some(Usage {
        prompt_tokens: count("prompt_tokens")?,
        completion_tokens: count("completion_tokens")?,
        total_tokens: count("total_tokens")?,
    })
}

/// Human-readable message for a non-success response.
///
/// OpenAI wraps failures as `{"error": {"message": ...}}`; anything else is
/// passed through as raw text.
fn upstream_error_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message").or(Some(e)))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.trim().to_string());

    if detail.is_empty() {
        format!("{status} status code (no body)")
    } else {
        format!("{status} {detail}")
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait::async_trait]
impl LlmProvider for OpenAiCompatProvider {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
        let url = self.chat_url();
        let body = self.build_chat_body(req);

        tracing::debug!(
            provider = %self.id,
            url = %url,
            turns = req.messages.len(),
            "openai_compat chat request"
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            return Err(Error::Upstream {
                provider: self.id.clone(),
                status: Some(status.as_u16()),
                message: upstream_error_message(status.as_u16(), &resp_text),
            });
        }

        let resp_json: Value = serde_json::from_str(&resp_text)?;
        let parsed = parse_chat_response(&resp_json);

        if let Some(usage) = parsed.usage {
            tracing::debug!(
                provider = %self.id,
                model = %parsed.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "openai_compat chat response"
            );
        }
        Ok(parsed)
    }

    fn provider_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> OpenAiCompatProvider {
        let cfg = LlmConfig {
            base_url: "http://localhost:9999/v1/".into(),
            ..Default::default()
        };
        OpenAiCompatProvider::from_config(&cfg, "sk-test".into()).unwrap()
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        assert_eq!(provider().chat_url(), "http://localhost:9999/v1/chat/completions");
    }

    #[test]
    fn body_carries_model_messages_and_temperature() {
        let req = ChatRequest {
            messages: vec![Turn::system("be brief").unwrap(), Turn::user("hello").unwrap()],
            temperature: Some(0.5),
            ..Default::default()
        };
        let body = provider().build_chat_body(&req);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["temperature"], json!(0.5));
        assert_eq!(
            body["messages"],
            json!([
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hello"},
            ])
        );
        assert_eq!(body.as_object().map(|o| o.len()), Some(3));
    }

    #[test]
    fn model_override_wins() {
        let req = ChatRequest {
            messages: vec![Turn::user("x").unwrap()],
            model: Some("gpt-4o".into()),
            ..Default::default()
        };
        assert_eq!(provider().build_chat_body(&req)["model"], "gpt-4o");
    }

    #[test]
    fn parses_first_choice() {
        let body = json!({
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [
                {"message": {"role": "assistant", "content": "hi there"}, "finish_reason": "stop"},
                {"message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7}
        });
        let resp = parse_chat_response(&body);
        assert_eq!(resp.content, "hi there");
        assert_eq!(resp.finish_reason.as_deref(), Some("stop"));
        assert_eq!(resp.usage.unwrap().total_tokens, 7);
    }

    #[test]
    fn oversized_token_counts_are_not_truncated() {
        let usage = json!({
            "prompt_tokens": 4_294_967_296u64,
            "completion_tokens": 1,
            "total_tokens": 4_294_967_297u64
        });
        assert_eq!(parse_openai_usage(&usage), None);

        let usage = json!({"prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7});
        assert_eq!(
            parse_openai_usage(&usage),
            Some(Usage {
                prompt_tokens: 5,
                completion_tokens: 2,
                total_tokens: 7
            })
        );
    }

    #[test]
    fn missing_content_defaults_to_empty() {
        let null_content = json!({"choices": [{"message": {"content": null}}]});
        assert_eq!(parse_chat_response(&null_content).content, "");

        let no_choices = json!({"choices": []});
        assert_eq!(parse_chat_response(&no_choices).content, "");
    }

    #[test]
    fn error_message_prefers_openai_error_shape() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "requests"}}"#;
        assert_eq!(upstream_error_message(429, body), "429 Rate limit reached");
    }

    #[test]
    fn error_message_falls_back_to_raw_text() {
        assert_eq!(upstream_error_message(502, "Bad Gateway\n"), "502 Bad Gateway");
        assert_eq!(upstream_error_message(500, ""), "500 status code (no body)");
    }
}
