pub mod openai_compat;
pub mod scripted;
pub mod traits;
pub mod util;

// Re-exports for convenience.
pub use openai_compat::OpenAiCompatProvider;
pub use scripted::{Scripted, ScriptedProvider};
pub use traits::{ChatRequest, ChatResponse, LlmProvider, Usage};
