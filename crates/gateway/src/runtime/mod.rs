//! Request-time machinery: the chat pipeline and the components it drives.

pub mod nag;
pub mod orchestrator;
pub mod pipeline;
pub mod random;

pub use orchestrator::{CompletionResult, Orchestrator};
pub use pipeline::{run_chat, PipelineSettings};
