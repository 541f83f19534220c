use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Upstream completion service
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Model identifier used when neither the config file nor `OPENAI_MODEL`
/// provides one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API (no trailing `/chat/completions`).
    #[serde(default = "d_base_url")]
    pub base_url: String,
    #[serde(default = "d_model")]
    pub model: String,
    /// Sampling temperature for the primary reply.
    #[serde(default = "d_temperature")]
    pub temperature: f32,
    /// Per-call HTTP timeout. There is no retry on expiry.
    #[serde(default = "d_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: d_base_url(),
            model: d_model(),
            temperature: d_temperature(),
            timeout_ms: d_timeout_ms(),
            auth: AuthConfig::default(),
        }
    }
}

/// Where the upstream credential comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Env var containing the key.
    #[serde(default = "d_api_key_env")]
    pub env: String,
    /// Direct key (for config-only setups; prefer `env`).
    #[serde(default, skip_serializing)]
    pub key: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            env: d_api_key_env(),
            key: None,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn d_model() -> String {
    DEFAULT_MODEL.into()
}
fn d_temperature() -> f32 {
    0.7
}
fn d_timeout_ms() -> u64 {
    60_000
}
fn d_api_key_env() -> String {
    "OPENAI_API_KEY".into()
}
