use np_domain::config::PromptConfig;
use np_domain::turn::Turn;

/// Length/tone policy applied to the upstream prompt.
#[derive(Debug, Clone, Default)]
pub struct PromptPolicy {
    instruction: Option<String>,
}

impl PromptPolicy {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_instruction(instruction: impl Into<String>) -> Self {
        let instruction = instruction.into();
        Self {
            instruction: (!instruction.is_empty()).then_some(instruction),
        }
    }

    pub fn from_config(cfg: &PromptConfig) -> Self {
        match cfg.active_instruction() {
            Some(text) => Self::with_instruction(text),
            None => Self::none(),
        }
    }

    pub fn instruction(&self) -> Option<&str> {
        self.instruction.as_deref()
    }
}

/// Prepend the policy's system instruction, if any.
///
/// The synthetic turn only lives for the upstream call; it is not part of
/// what the caller sent and is never returned to them.
pub fn augment(transcript: Vec<Turn>, policy: &PromptPolicy) -> Vec<Turn> {
    let Some(system) = policy.instruction().and_then(Turn::system) else {
        return transcript;
    };
    let mut out = Vec::with_capacity(transcript.len() + 1);
    out.push(system);
    out.extend(transcript);
    out
}
