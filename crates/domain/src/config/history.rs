use serde::{Deserialize, Serialize};

/// Number of most-recent turns forwarded upstream when not configured.
pub const DEFAULT_WINDOW: usize = 50;

/// Bounds on client-supplied conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "d_window")]
    pub max_turns: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_WINDOW,
        }
    }
}

fn d_window() -> usize {
    DEFAULT_WINDOW
}
