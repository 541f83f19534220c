use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Prompt augmentation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Synthetic system instruction prepended to every upstream call.
///
/// When `enabled` is false (or the instruction is empty) the transcript is
/// forwarded as the client sent it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "d_true")]
    pub enabled: bool,
    #[serde(default = "d_instruction")]
    pub instruction: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            instruction: d_instruction(),
        }
    }
}

impl PromptConfig {
    /// The instruction to inject, if any.
    pub fn active_instruction(&self) -> Option<&str> {
        if self.enabled && !self.instruction.is_empty() {
            Some(&self.instruction)
        } else {
            None
        }
    }
}

fn d_true() -> bool {
    true
}

fn d_instruction() -> String {
    "あなたは親切なAIアシスタントです。ユーザーの質問に対して、できるだけ簡潔に150文字程度で回答してください。要点を絞って、分かりやすく答えることを心がけてください。".into()
}
